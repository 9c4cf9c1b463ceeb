//! Iterative deepening alpha-beta search
//!
//! The search tree is walked with a negamax alpha-beta over the
//! ordered move lists, quiescence at the horizon, a check extension,
//! null move pruning and the transposition table for cutoffs and move
//! ordering. Every completed iteration reports its score and principal
//! variation.

use std::time::{Duration, Instant};

use board::Board;
use hash_tables::{Bound, ProbeResult, TranspositionTable};
use move_generation::moves::{Move, NO_MOVE};
use move_generation::pick_next_move;
use types::*;

/// Tunable engine settings
pub struct EngineConfig {
    pub hash_size_mb: usize,
    pub use_null_move: bool,
    /// Reserved for an opening book, no book ships with the engine
    pub use_book: bool,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            hash_size_mb: 64,
            use_null_move: true,
            use_book: false,
        }
    }
}

/// Per-search state: limits, counters and the stop flag
pub struct SearchInfo {
    pub start_time: Instant,
    pub stop_time: Option<Instant>,
    pub depth: u8,

    pub nodes: u64,
    pub stopped: bool,

    // Move ordering quality, beta cutoffs and how many of them came
    // from the first move tried
    pub fail_high: f64,
    pub fail_high_first: f64,
    pub null_cut: u64,

    pub use_null_move: bool,
}

impl SearchInfo {
    pub fn new(depth: u8, search_time: Option<Duration>) -> SearchInfo {
        let start_time = Instant::now();
        SearchInfo {
            start_time,
            stop_time: search_time.map(|limit| start_time + limit),
            depth,
            nodes: 0,
            stopped: false,
            fail_high: 0.0,
            fail_high_first: 0.0,
            null_cut: 0,
            use_null_move: true,
        }
    }

    fn check_up(&mut self) {
        if let Some(stop_time) = self.stop_time {
            if Instant::now() >= stop_time {
                self.stopped = true;
            }
        }
    }

    /// Share of beta cutoffs found on the first move tried
    pub fn ordering(&self) -> f64 {
        if self.fail_high > 0.0 {
            self.fail_high_first / self.fail_high
        } else {
            0.0
        }
    }
}

/// One completed deepening iteration
pub struct DepthReport {
    pub depth: u8,
    pub score: i32,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub pv: Vec<Move>,
}

pub struct SearchResult {
    /// None when the side to move has no legal move
    pub best_move: Option<Move>,
    pub reports: Vec<DepthReport>,
}

fn elapsed_ms(since: Instant) -> u64 {
    let elapsed = since.elapsed();
    elapsed.as_secs() * 1000 + u64::from(elapsed.subsec_millis())
}

fn log_report(report: &DepthReport) {
    print!(
        "score:{} depth:{} nodes:{} time:{}ms pv",
        report.score, report.depth, report.nodes, report.elapsed_ms
    );
    for mov in report.pv.iter() {
        print!(" {}", mov);
    }
    println!();
}

impl Board {
    /// Has the current position occurred before since the last
    /// irreversible move?
    pub fn is_repetition(&self) -> bool {
        let len = self.history.len();
        if len == 0 {
            return false;
        }
        let end = len - 1;
        let start = len.saturating_sub(self.fifty_move as usize).min(end);
        self.history[start..end]
            .iter()
            .any(|undo| undo.key == self.key)
    }

    fn clear_for_search(&mut self, info: &mut SearchInfo, table: &mut TranspositionTable) {
        for row in self.search_history.iter_mut() {
            for counter in row.iter_mut() {
                *counter = 0;
            }
        }
        for row in self.search_killers.iter_mut() {
            for killer in row.iter_mut() {
                *killer = NO_MOVE;
            }
        }

        table.over_write = 0;
        table.hit = 0;
        table.cut = 0;
        self.ply = 0;

        info.stopped = false;
        info.nodes = 0;
        info.fail_high = 0.0;
        info.fail_high_first = 0.0;
        info.null_cut = 0;
    }

    // Resolves captures until the position is quiet, so the horizon
    // never cuts a capture sequence in half
    fn quiescence(&mut self, mut alpha: i32, beta: i32, info: &mut SearchInfo) -> i32 {
        self.debug_check();
        debug_assert!(beta > alpha);

        if info.nodes & 2047 == 0 {
            info.check_up();
        }
        info.nodes += 1;

        if self.is_repetition() || self.fifty_move >= 100 {
            return 0;
        }
        if self.ply >= MAX_DEPTH {
            return self.evaluate();
        }

        // Stand pat: the side to move can usually do at least as well
        // as doing nothing
        let stand_pat = self.evaluate();
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut list = self.generate_all_captures();
        let mut legal = 0;

        for move_num in 0..list.len() {
            pick_next_move(&mut list, move_num);
            let mov = list[move_num].mov;

            if !self.make_move(mov) {
                continue;
            }
            legal += 1;
            let score = -self.quiescence(-beta, -alpha, info);
            self.take_move();

            if info.stopped {
                return 0;
            }

            if score > alpha {
                if score >= beta {
                    if legal == 1 {
                        info.fail_high_first += 1.0;
                    }
                    info.fail_high += 1.0;
                    return beta;
                }
                alpha = score;
            }
        }

        alpha
    }

    fn alpha_beta(
        &mut self,
        mut alpha: i32,
        beta: i32,
        mut depth: u8,
        info: &mut SearchInfo,
        table: &mut TranspositionTable,
        do_null: bool,
    ) -> i32 {
        self.debug_check();
        debug_assert!(beta > alpha);

        if depth == 0 {
            return self.quiescence(alpha, beta, info);
        }

        if info.nodes & 2047 == 0 {
            info.check_up();
        }
        info.nodes += 1;

        if (self.is_repetition() || self.fifty_move >= 100) && self.ply > 0 {
            return 0;
        }
        if self.ply >= MAX_DEPTH {
            return self.evaluate();
        }

        let in_check = self.in_check();
        if in_check {
            depth += 1;
        }

        let mut pv_move = NO_MOVE;
        match table.probe(self.key, alpha, beta, depth, self.ply) {
            ProbeResult::Cutoff(_, score) => {
                table.cut += 1;
                return score;
            }
            ProbeResult::Move(mov) => pv_move = mov,
            ProbeResult::Miss => {}
        }

        if do_null
            && info.use_null_move
            && !in_check
            && self.ply > 0
            && depth >= 4
            && self.big_pieces[self.side as usize] > 1
        {
            self.make_null_move();
            let score = -self.alpha_beta(-beta, -beta + 1, depth - 4, info, table, false);
            self.take_null_move();

            if info.stopped {
                return 0;
            }
            if score >= beta && score.abs() < IS_MATE {
                info.null_cut += 1;
                return beta;
            }
        }

        let mut list = self.generate_all_moves();
        if pv_move != NO_MOVE {
            for scored in list.iter_mut() {
                if scored.mov == pv_move {
                    scored.score = 2_000_000;
                    break;
                }
            }
        }

        let old_alpha = alpha;
        let mut best_move = NO_MOVE;
        let mut best_score = -INFINITE;
        let mut legal = 0;

        for move_num in 0..list.len() {
            pick_next_move(&mut list, move_num);
            let mov = list[move_num].mov;

            if !self.make_move(mov) {
                continue;
            }
            legal += 1;
            let score = -self.alpha_beta(-beta, -alpha, depth - 1, info, table, true);
            self.take_move();

            if info.stopped {
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = mov;

                if score > alpha {
                    if score >= beta {
                        if legal == 1 {
                            info.fail_high_first += 1.0;
                        }
                        info.fail_high += 1.0;

                        if !mov.is_capture() && self.ply < MAX_DEPTH {
                            self.search_killers[1][self.ply] = self.search_killers[0][self.ply];
                            self.search_killers[0][self.ply] = mov;
                        }

                        table.store(self.key, best_move, beta, depth, Bound::Beta, self.ply);
                        return beta;
                    }
                    alpha = score;

                    if !mov.is_capture() {
                        let piece = self.pieces[mov.from_sq() as usize];
                        self.search_history[piece as usize][mov.to_sq() as usize] +=
                            i32::from(depth);
                    }
                }
            }
        }

        if legal == 0 {
            if in_check {
                // Mate distance, closer mates score higher
                return -INFINITE + self.ply as i32;
            }
            return 0;
        }

        debug_assert!(alpha >= old_alpha);

        if alpha != old_alpha {
            table.store(self.key, best_move, best_score, depth, Bound::Exact, self.ply);
        } else {
            table.store(self.key, best_move, alpha, depth, Bound::Alpha, self.ply);
        }

        alpha
    }

    /// Searches the position by iterative deepening up to
    /// `info.depth`, logging each completed iteration
    pub fn search_position(
        &mut self,
        info: &mut SearchInfo,
        table: &mut TranspositionTable,
    ) -> SearchResult {
        self.clear_for_search(info, table);

        let mut result = SearchResult {
            best_move: None,
            reports: Vec::new(),
        };

        for depth in 1..=info.depth {
            let score = self.alpha_beta(-INFINITE, INFINITE, depth, info, table, true);

            if info.stopped {
                break;
            }

            let pv = table.pv_line(self, depth);
            result.best_move = pv.first().map(|scored| scored.mov);

            let report = DepthReport {
                depth,
                score,
                nodes: info.nodes,
                elapsed_ms: elapsed_ms(info.start_time),
                pv: pv.iter().map(|scored| scored.mov).collect(),
            };
            log_report(&report);
            result.reports.push(report);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hash_tables::TranspositionTable;

    fn search(fen: &str, depth: u8) -> SearchResult {
        let mut board = Board::from_fen(fen).unwrap();
        let mut info = SearchInfo::new(depth, None);
        let mut table = TranspositionTable::new(16);
        board.search_position(&mut info, &mut table)
    }

    #[test]
    fn finds_mate_in_one() {
        let result = search("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1", 3);
        assert_eq!(format!("{}", result.best_move.unwrap()), "a1a8");

        let report = result.reports.last().unwrap();
        assert!(report.score > IS_MATE);
    }

    #[test]
    fn stalemate_has_no_best_move() {
        let result = search("7k/5Q2/8/8/8/8/8/K7 b - - 0 1", 3);
        assert!(result.best_move.is_none());
    }

    #[test]
    fn reports_every_iteration() {
        let result = search(START_FEN, 4);
        assert_eq!(result.reports.len(), 4);
        assert!(result.best_move.is_some());

        for (i, report) in result.reports.iter().enumerate() {
            assert_eq!(report.depth as usize, i + 1);
            assert!(!report.pv.is_empty());
        }
    }

    #[test]
    fn repetition_detection() {
        let mut board = Board::initial_position();
        for mov in ["g1f3", "g8f6", "f3g1", "f6g8"].iter() {
            let parsed = board.parse_move(mov);
            assert!(board.make_move(parsed));
        }
        // Back to the initial position, the first occurrence is in the
        // history
        assert!(board.is_repetition());

        let mut board = Board::initial_position();
        let parsed = board.parse_move("e2e4");
        assert!(board.make_move(parsed));
        assert!(!board.is_repetition());

        // A capture resets the fifty-move counter while the history
        // keeps growing, so the lookback window must stay empty
        // instead of inverting
        let mut board = Board::initial_position();
        for mov in ["e2e4", "d7d5", "e4d5"].iter() {
            let parsed = board.parse_move(mov);
            assert!(board.make_move(parsed));
        }
        assert!(!board.is_repetition());
    }

    #[test]
    fn null_move_pruning_reduces_nodes() {
        let fen = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

        let mut board = Board::from_fen(fen).unwrap();
        let mut info = SearchInfo::new(5, None);
        let mut table = TranspositionTable::new(16);
        board.search_position(&mut info, &mut table);
        let with_null = info.nodes;

        let mut board = Board::from_fen(fen).unwrap();
        let mut info = SearchInfo::new(5, None);
        info.use_null_move = false;
        let mut table = TranspositionTable::new(16);
        board.search_position(&mut info, &mut table);
        let without_null = info.nodes;

        // Pruning should not cost nodes overall
        assert!(with_null <= without_null * 12 / 10);
    }

    #[test]
    fn time_limit_stops_the_search() {
        use std::time::Duration;

        let mut board = Board::initial_position();
        let mut info = SearchInfo::new(MAX_DEPTH as u8 - 1, Some(Duration::from_millis(100)));
        let mut table = TranspositionTable::new(16);

        let start = Instant::now();
        board.search_position(&mut info, &mut table);
        assert!(start.elapsed() < Duration::from_secs(10));
    }
}
