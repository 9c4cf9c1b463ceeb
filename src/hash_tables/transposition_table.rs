//! The transposition table
//!
//! A fixed-size always-replace hash table indexed by the position key.
//! Each entry remembers the best move and a score bound from an
//! earlier visit of the position, so the search can cut off or at
//! least order that move first. The table also reconstructs the
//! principal variation after each iteration.

use std::mem;

use board::Board;
use move_generation::moves::{Move, MoveList, ScoredMove, NO_MOVE};
use types::{IS_MATE, MAX_DEPTH};

/// How a stored score relates to the search window it was found with
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Bound {
    None = 0,
    Alpha,
    Beta,
    Exact,
}

#[derive(Copy, Clone)]
struct TTEntry {
    key: u64,
    mov: Move,
    score: i32,
    depth: u8,
    bound: Bound,
}

const EMPTY_ENTRY: TTEntry = TTEntry {
    key: 0,
    mov: NO_MOVE,
    score: 0,
    depth: 0,
    bound: Bound::None,
};

/// Outcome of a table probe
pub enum ProbeResult {
    /// Nothing stored for this position
    Miss,
    /// A best move for ordering, the stored depth was too shallow to
    /// cut off
    Move(Move),
    /// The stored bound settles this node at the given score
    Cutoff(Move, i32),
}

/// The principal variation recovered from the table
pub type PvLine = MoveList;

pub struct TranspositionTable {
    entries: Vec<TTEntry>,

    // Usage statistics, reported after a search
    pub new_write: u64,
    pub over_write: u64,
    pub hit: u64,
    pub cut: u64,
}

impl TranspositionTable {
    /// Allocates a table of roughly `size_mb` megabytes, halving on
    /// allocation failure until it fits
    pub fn new(size_mb: usize) -> TranspositionTable {
        let mut size = size_mb.max(1) * 0x10_0000;

        loop {
            let count = size / mem::size_of::<TTEntry>();
            let mut entries: Vec<TTEntry> = Vec::new();
            if entries.try_reserve_exact(count).is_ok() {
                entries.resize(count, EMPTY_ENTRY);
                println!("hash table initialized with {} entries", count);
                return TranspositionTable {
                    entries,
                    new_write: 0,
                    over_write: 0,
                    hit: 0,
                    cut: 0,
                };
            }
            eprintln!("hash allocation of {} bytes failed, halving", size);
            size /= 2;
        }
    }

    pub fn clear(&mut self) {
        for entry in self.entries.iter_mut() {
            *entry = EMPTY_ENTRY;
        }
        self.new_write = 0;
        self.over_write = 0;
        self.hit = 0;
        self.cut = 0;
    }

    fn index(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    /// Stores a search result, always replacing. Mate scores are kept
    /// relative to this node so they stay valid at any ply.
    pub fn store(&mut self, key: u64, mov: Move, mut score: i32, depth: u8, bound: Bound, ply: usize) {
        let index = self.index(key);

        if self.entries[index].bound == Bound::None {
            self.new_write += 1;
        } else {
            self.over_write += 1;
        }

        if score > IS_MATE {
            score += ply as i32;
        } else if score < -IS_MATE {
            score -= ply as i32;
        }

        self.entries[index] = TTEntry {
            key,
            mov,
            score,
            depth,
            bound,
        };
    }

    /// Looks the position up and checks whether the stored bound
    /// already settles a window of `(alpha, beta)` at `depth`
    pub fn probe(
        &mut self,
        key: u64,
        alpha: i32,
        beta: i32,
        depth: u8,
        ply: usize,
    ) -> ProbeResult {
        let entry = self.entries[self.index(key)];
        if entry.key != key || entry.bound == Bound::None {
            return ProbeResult::Miss;
        }

        if entry.depth < depth {
            return ProbeResult::Move(entry.mov);
        }
        self.hit += 1;

        let mut score = entry.score;
        if score > IS_MATE {
            score -= ply as i32;
        } else if score < -IS_MATE {
            score += ply as i32;
        }

        match entry.bound {
            Bound::Alpha if score <= alpha => ProbeResult::Cutoff(entry.mov, alpha),
            Bound::Beta if score >= beta => ProbeResult::Cutoff(entry.mov, beta),
            Bound::Exact => ProbeResult::Cutoff(entry.mov, score),
            _ => ProbeResult::Move(entry.mov),
        }
    }

    /// The stored best move of the position, for variation walking
    pub fn probe_pv(&self, key: u64) -> Option<Move> {
        let entry = &self.entries[self.index(key)];
        if entry.key == key && entry.mov != NO_MOVE {
            Some(entry.mov)
        } else {
            None
        }
    }

    /// Walks stored best moves from the current position to recover
    /// the principal variation, at most `depth` moves long. The board
    /// comes back unchanged.
    pub fn pv_line(&self, board: &mut Board, depth: u8) -> PvLine {
        let mut line = PvLine::new();

        while let Some(mov) = self.probe_pv(board.key) {
            if line.len() >= depth as usize || line.len() >= MAX_DEPTH {
                break;
            }
            if !board.move_exists(mov) || !board.make_move(mov) {
                break;
            }
            line.push(ScoredMove { mov, score: 0 });
        }

        while board.ply > 0 {
            board.take_move();
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::Board;
    use types::INFINITE;

    #[test]
    fn store_and_probe() {
        let mut table = TranspositionTable::new(1);
        let board = Board::initial_position();
        let mov = board.parse_move("e2e4");

        table.store(board.key, mov, 42, 6, Bound::Exact, 0);
        assert_eq!(table.new_write, 1);

        match table.probe(board.key, -INFINITE, INFINITE, 6, 0) {
            ProbeResult::Cutoff(best, score) => {
                assert_eq!(best, mov);
                assert_eq!(score, 42);
            }
            _ => panic!("stored entry not found"),
        }

        // A deeper request only yields the move
        match table.probe(board.key, -INFINITE, INFINITE, 8, 0) {
            ProbeResult::Move(best) => assert_eq!(best, mov),
            _ => panic!("expected an ordering move"),
        }

        assert!(match table.probe(board.key ^ 1, -INFINITE, INFINITE, 1, 0) {
            ProbeResult::Miss => true,
            _ => false,
        });

        table.clear();
        assert!(match table.probe(board.key, -INFINITE, INFINITE, 1, 0) {
            ProbeResult::Miss => true,
            _ => false,
        });
    }

    #[test]
    fn bounds_respect_the_window() {
        let mut table = TranspositionTable::new(1);
        let board = Board::initial_position();
        let mov = board.parse_move("e2e4");

        table.store(board.key, mov, 10, 4, Bound::Beta, 0);

        // score >= beta cuts off at beta
        match table.probe(board.key, -100, 5, 4, 0) {
            ProbeResult::Cutoff(_, score) => assert_eq!(score, 5),
            _ => panic!("expected a beta cutoff"),
        }

        // An open window only yields the move
        match table.probe(board.key, -100, 100, 4, 0) {
            ProbeResult::Move(best) => assert_eq!(best, mov),
            _ => panic!("expected an ordering move"),
        }
    }

    #[test]
    fn mate_scores_stay_ply_relative() {
        let mut table = TranspositionTable::new(1);
        let board = Board::initial_position();
        let mov = board.parse_move("e2e4");

        // A mate found 3 plies into the search, stored from ply 3 and
        // probed from ply 5
        let mate = INFINITE - 10;
        table.store(board.key, mov, mate, 4, Bound::Exact, 3);
        match table.probe(board.key, -INFINITE, INFINITE, 4, 5) {
            ProbeResult::Cutoff(_, score) => assert_eq!(score, mate + 3 - 5),
            _ => panic!("stored entry not found"),
        }
    }

    #[test]
    fn pv_line_reconstruction() {
        let mut table = TranspositionTable::new(1);
        let mut board = Board::initial_position();

        let first = board.parse_move("e2e4");
        table.store(board.key, first, 0, 1, Bound::Exact, 0);
        assert!(board.make_move(first));

        let second = board.parse_move("e7e5");
        table.store(board.key, second, 0, 1, Bound::Exact, 0);
        board.take_move();

        let line = table.pv_line(&mut board, 4);
        assert_eq!(line.len(), 2);
        assert_eq!(line[0].mov, first);
        assert_eq!(line[1].mov, second);

        // The walk restored the original position
        assert_eq!(board.ply, 0);
        assert_eq!(board.key, Board::initial_position().key);
    }
}
