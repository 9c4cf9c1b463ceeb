pub mod moves;
pub mod perft;

pub use self::moves::*;
pub use self::perft::{perft, perft_divide};

// Perft tests for move generation, see move_generation/perft_tests.rs
#[cfg(test)]
mod perft_tests;

use board::attack::{BISHOP_DIRS, KING_DIRS, KNIGHT_DIRS, ROOK_DIRS};
use board::{Board, BKCA, BQCA, WKCA, WQCA};
use types::*;

// This module generates pseudo-legal moves from the piece lists:
// moves leaving the own king attacked are rejected later by make_move.
// Every move gets an ordering score when it enters the list so the
// search can pick moves by partial selection sort.

// Ordering scores: PV move first (scored by the search), then captures
// by MVV-LVA, then the two killers, then history counters
const CAPTURE_SCORE_BONUS: i32 = 1_000_000;
const FIRST_KILLER_SCORE: i32 = 900_000;
const SECOND_KILLER_SCORE: i32 = 800_000;

lazy_static! {
    // MVV-LVA: most valuable victim first, least valuable attacker
    // breaking ties
    static ref MVV_LVA_SCORES: [[i32; 13]; 13] = init_mvv_lva();
}

fn init_mvv_lva() -> [[i32; 13]; 13] {
    const VICTIM_SCORE: [i32; 13] = [0, 100, 200, 300, 400, 500, 600, 100, 200, 300, 400, 500, 600];

    let mut scores = [[0; 13]; 13];
    for &attacker in PIECES_LIST.iter() {
        for &victim in PIECES_LIST.iter() {
            scores[victim as usize][attacker as usize] =
                VICTIM_SCORE[victim as usize] + 6 - VICTIM_SCORE[attacker as usize] / 100;
        }
    }
    scores
}

const WHITE_PROMOTIONS: [Piece; 4] = [WQ, WR, WB, WN];
const BLACK_PROMOTIONS: [Piece; 4] = [BQ, BR, BB, BN];

const SLIDERS: [[Piece; 3]; 2] = [[WB, WR, WQ], [BB, BR, BQ]];
const NON_SLIDERS: [[Piece; 2]; 2] = [[WN, WK], [BN, BK]];

fn piece_dirs(piece: Piece) -> &'static [i16] {
    match piece {
        Piece::WhiteKnight | Piece::BlackKnight => &KNIGHT_DIRS,
        Piece::WhiteBishop | Piece::BlackBishop => &BISHOP_DIRS,
        Piece::WhiteRook | Piece::BlackRook => &ROOK_DIRS,
        Piece::WhiteQueen | Piece::BlackQueen | Piece::WhiteKing | Piece::BlackKing => &KING_DIRS,
        _ => unreachable!(),
    }
}

impl Board {
    fn add_quiet_move(&self, list: &mut MoveList, mov: Move) {
        debug_assert!(!mov.is_capture());

        let mut score = 0;
        if self.ply < MAX_DEPTH {
            if self.search_killers[0][self.ply] == mov {
                score = FIRST_KILLER_SCORE;
            } else if self.search_killers[1][self.ply] == mov {
                score = SECOND_KILLER_SCORE;
            }
        }
        if score == 0 {
            let piece = self.pieces[mov.from_sq() as usize];
            score = self.search_history[piece as usize][mov.to_sq() as usize];
        }

        list.push(ScoredMove { mov, score });
    }

    fn add_capture_move(&self, list: &mut MoveList, mov: Move) {
        let attacker = self.pieces[mov.from_sq() as usize];
        let score = MVV_LVA_SCORES[mov.captured() as usize][attacker as usize];
        list.push(ScoredMove {
            mov,
            score: score + CAPTURE_SCORE_BONUS,
        });
    }

    fn add_en_passant_move(&self, list: &mut MoveList, mov: Move) {
        // A pawn takes a pawn, scored like PxP
        list.push(ScoredMove {
            mov,
            score: 105 + CAPTURE_SCORE_BONUS,
        });
    }

    fn add_white_pawn_capture(&self, list: &mut MoveList, from: Square, to: Square, captured: Piece) {
        if from.rank() == RANK_7 {
            for &promoted in WHITE_PROMOTIONS.iter() {
                self.add_capture_move(list, Move::new(from, to, captured, promoted, 0));
            }
        } else {
            self.add_capture_move(list, Move::new(from, to, captured, Piece::Empty, 0));
        }
    }

    fn add_white_pawn_move(&self, list: &mut MoveList, from: Square, to: Square) {
        if from.rank() == RANK_7 {
            for &promoted in WHITE_PROMOTIONS.iter() {
                self.add_quiet_move(list, Move::new(from, to, Piece::Empty, promoted, 0));
            }
        } else {
            self.add_quiet_move(list, Move::new(from, to, Piece::Empty, Piece::Empty, 0));
        }
    }

    fn add_black_pawn_capture(&self, list: &mut MoveList, from: Square, to: Square, captured: Piece) {
        if from.rank() == RANK_2 {
            for &promoted in BLACK_PROMOTIONS.iter() {
                self.add_capture_move(list, Move::new(from, to, captured, promoted, 0));
            }
        } else {
            self.add_capture_move(list, Move::new(from, to, captured, Piece::Empty, 0));
        }
    }

    fn add_black_pawn_move(&self, list: &mut MoveList, from: Square, to: Square) {
        if from.rank() == RANK_2 {
            for &promoted in BLACK_PROMOTIONS.iter() {
                self.add_quiet_move(list, Move::new(from, to, Piece::Empty, promoted, 0));
            }
        } else {
            self.add_quiet_move(list, Move::new(from, to, Piece::Empty, Piece::Empty, 0));
        }
    }

    fn generate_white_pawn_moves(&self, list: &mut MoveList, captures_only: bool) {
        for i in 0..self.piece_count[WP as usize] as usize {
            let sq = self.piece_list[WP as usize][i];

            if !captures_only && self.pieces[sq as usize + 10] == Piece::Empty {
                self.add_white_pawn_move(list, sq, sq + 10);
                if sq.rank() == RANK_2 && self.pieces[sq as usize + 20] == Piece::Empty {
                    self.add_quiet_move(
                        list,
                        Move::new(sq, sq + 20, Piece::Empty, Piece::Empty, PAWN_START_FLAG),
                    );
                }
            }

            for &to in [sq + 9, sq + 11].iter() {
                let target = self.pieces[to as usize];
                if target != Piece::OffBoard && target.color() == Color::Black {
                    self.add_white_pawn_capture(list, sq, to, target);
                }
            }

            if self.en_passant != NO_SQ {
                if sq + 9 == self.en_passant || sq + 11 == self.en_passant {
                    self.add_en_passant_move(
                        list,
                        Move::new(sq, self.en_passant, Piece::Empty, Piece::Empty, EP_FLAG),
                    );
                }
            }
        }
    }

    fn generate_black_pawn_moves(&self, list: &mut MoveList, captures_only: bool) {
        for i in 0..self.piece_count[BP as usize] as usize {
            let sq = self.piece_list[BP as usize][i];

            if !captures_only && self.pieces[sq as usize - 10] == Piece::Empty {
                self.add_black_pawn_move(list, sq, sq - 10);
                if sq.rank() == RANK_7 && self.pieces[sq as usize - 20] == Piece::Empty {
                    self.add_quiet_move(
                        list,
                        Move::new(sq, sq - 20, Piece::Empty, Piece::Empty, PAWN_START_FLAG),
                    );
                }
            }

            for &to in [sq - 9, sq - 11].iter() {
                let target = self.pieces[to as usize];
                if target != Piece::OffBoard && target.color() == Color::White {
                    self.add_black_pawn_capture(list, sq, to, target);
                }
            }

            if self.en_passant != NO_SQ {
                if sq - 9 == self.en_passant || sq - 11 == self.en_passant {
                    self.add_en_passant_move(
                        list,
                        Move::new(sq, self.en_passant, Piece::Empty, Piece::Empty, EP_FLAG),
                    );
                }
            }
        }
    }

    // The attack checks cover the king square and the transit square,
    // the arrival square is left to the make_move legality gate
    fn generate_castling_moves(&self, list: &mut MoveList) {
        if self.side == Color::White {
            if self.castle_perm & WKCA != 0
                && self.pieces[F1 as usize] == Piece::Empty
                && self.pieces[G1 as usize] == Piece::Empty
                && !self.is_square_attacked(E1, Color::Black)
                && !self.is_square_attacked(F1, Color::Black)
            {
                self.add_quiet_move(
                    list,
                    Move::new(E1, G1, Piece::Empty, Piece::Empty, CASTLE_FLAG),
                );
            }
            if self.castle_perm & WQCA != 0
                && self.pieces[D1 as usize] == Piece::Empty
                && self.pieces[C1 as usize] == Piece::Empty
                && self.pieces[B1 as usize] == Piece::Empty
                && !self.is_square_attacked(E1, Color::Black)
                && !self.is_square_attacked(D1, Color::Black)
            {
                self.add_quiet_move(
                    list,
                    Move::new(E1, C1, Piece::Empty, Piece::Empty, CASTLE_FLAG),
                );
            }
        } else {
            if self.castle_perm & BKCA != 0
                && self.pieces[F8 as usize] == Piece::Empty
                && self.pieces[G8 as usize] == Piece::Empty
                && !self.is_square_attacked(E8, Color::White)
                && !self.is_square_attacked(F8, Color::White)
            {
                self.add_quiet_move(
                    list,
                    Move::new(E8, G8, Piece::Empty, Piece::Empty, CASTLE_FLAG),
                );
            }
            if self.castle_perm & BQCA != 0
                && self.pieces[D8 as usize] == Piece::Empty
                && self.pieces[C8 as usize] == Piece::Empty
                && self.pieces[B8 as usize] == Piece::Empty
                && !self.is_square_attacked(E8, Color::White)
                && !self.is_square_attacked(D8, Color::White)
            {
                self.add_quiet_move(
                    list,
                    Move::new(E8, C8, Piece::Empty, Piece::Empty, CASTLE_FLAG),
                );
            }
        }
    }

    fn generate(&self, list: &mut MoveList, captures_only: bool) {
        self.debug_check();
        debug_assert!(self.side != Color::Both);

        let side = self.side;

        if side == Color::White {
            self.generate_white_pawn_moves(list, captures_only);
        } else {
            self.generate_black_pawn_moves(list, captures_only);
        }
        if !captures_only {
            self.generate_castling_moves(list);
        }

        for &piece in SLIDERS[side as usize].iter() {
            for i in 0..self.piece_count[piece as usize] as usize {
                let sq = self.piece_list[piece as usize][i];
                for &dir in piece_dirs(piece).iter() {
                    let mut t_sq = i16::from(sq) + dir;
                    loop {
                        let target = self.pieces[t_sq as usize];
                        if target == Piece::OffBoard {
                            break;
                        }
                        if target != Piece::Empty {
                            if target.color() == side.swap() {
                                self.add_capture_move(
                                    list,
                                    Move::new(sq, t_sq as Square, target, Piece::Empty, 0),
                                );
                            }
                            break;
                        }
                        if !captures_only {
                            self.add_quiet_move(
                                list,
                                Move::new(sq, t_sq as Square, Piece::Empty, Piece::Empty, 0),
                            );
                        }
                        t_sq += dir;
                    }
                }
            }
        }

        for &piece in NON_SLIDERS[side as usize].iter() {
            for i in 0..self.piece_count[piece as usize] as usize {
                let sq = self.piece_list[piece as usize][i];
                for &dir in piece_dirs(piece).iter() {
                    let t_sq = i16::from(sq) + dir;
                    let target = self.pieces[t_sq as usize];
                    if target == Piece::OffBoard {
                        continue;
                    }
                    if target != Piece::Empty {
                        if target.color() == side.swap() {
                            self.add_capture_move(
                                list,
                                Move::new(sq, t_sq as Square, target, Piece::Empty, 0),
                            );
                        }
                        continue;
                    }
                    if !captures_only {
                        self.add_quiet_move(
                            list,
                            Move::new(sq, t_sq as Square, Piece::Empty, Piece::Empty, 0),
                        );
                    }
                }
            }
        }
    }

    /// Generates all pseudo-legal moves of the side to move
    pub fn generate_all_moves(&self) -> MoveList {
        let mut list = MoveList::new();
        self.generate(&mut list, false);
        list
    }

    /// Generates only captures and en passant, for the quiescence
    /// search
    pub fn generate_all_captures(&self) -> MoveList {
        let mut list = MoveList::new();
        self.generate(&mut list, true);
        list
    }

    /// A move is playable iff it is generated in this position and
    /// survives the legality gate
    pub fn move_exists(&mut self, mov: Move) -> bool {
        let list = self.generate_all_moves();
        for scored in list.iter() {
            if scored.mov != mov {
                continue;
            }
            if self.make_move(mov) {
                self.take_move();
                return true;
            }
            return false;
        }
        false
    }

    /// Decodes a move in coordinate notation ("e2e4", "e7e8q") against
    /// the generated moves of this position. Returns `NO_MOVE` for
    /// unknown syntax or a move that cannot be played here.
    pub fn parse_move(&self, input: &str) -> Move {
        let bytes = input.as_bytes();
        if bytes.len() < 4 || bytes.len() > 5 {
            return NO_MOVE;
        }
        if !(b'a'..=b'h').contains(&bytes[0])
            || !(b'1'..=b'8').contains(&bytes[1])
            || !(b'a'..=b'h').contains(&bytes[2])
            || !(b'1'..=b'8').contains(&bytes[3])
        {
            return NO_MOVE;
        }

        let from = from_file_rank(bytes[0] - b'a', bytes[1] - b'1');
        let to = from_file_rank(bytes[2] - b'a', bytes[3] - b'1');

        let list = self.generate_all_moves();
        for scored in list.iter() {
            let mov = scored.mov;
            if mov.from_sq() != from || mov.to_sq() != to {
                continue;
            }
            let promoted = mov.promoted();
            if promoted != Piece::Empty {
                if bytes.len() == 5
                    && promoted.to_char().to_ascii_lowercase() == char::from(bytes[4])
                {
                    return mov;
                }
                continue;
            }
            return mov;
        }

        NO_MOVE
    }
}

/// Brings the best-scored remaining move to `move_num` so the search
/// can consume the list lazily in order
pub fn pick_next_move(list: &mut MoveList, move_num: usize) {
    let mut best_score = list[move_num].score;
    let mut best_num = move_num;
    for index in move_num + 1..list.len() {
        if list[index].score > best_score {
            best_score = list[index].score;
            best_num = index;
        }
    }
    list.swap(move_num, best_num);
}

#[cfg(test)]
mod tests {
    use board::Board;
    use move_generation::moves::{Move, NO_MOVE};
    use move_generation::pick_next_move;
    use types::*;

    #[test]
    fn move_counts() {
        let board = Board::initial_position();
        assert_eq!(board.generate_all_moves().len(), 20);
        assert_eq!(board.generate_all_captures().len(), 0);

        // Every castling available, 48 moves in total
        let board =
            Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        assert_eq!(board.generate_all_moves().len(), 48);
        assert_eq!(board.generate_all_captures().len(), 8);
    }

    #[test]
    fn promotions_are_expanded() {
        let board = Board::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let list = board.generate_all_moves();
        let promotions = list.iter().filter(|s| s.mov.is_promotion()).count();
        assert_eq!(promotions, 4);
    }

    #[test]
    fn en_passant_is_generated() {
        let board =
            Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        let list = board.generate_all_moves();
        let ep: Vec<_> = list.iter().filter(|s| s.mov.is_en_passant()).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(format!("{}", ep[0].mov), "e5f6");
    }

    #[test]
    fn captures_ordered_by_victim_value() {
        // A pawn can take a queen, a rook can take a pawn
        let board = Board::from_fen("k7/8/2q1p3/3P4/8/8/8/K2R4 w - - 0 1").unwrap();
        let mut list = board.generate_all_captures();
        assert!(list.len() >= 2);

        pick_next_move(&mut list, 0);
        assert_eq!(format!("{}", list[0].mov), "d5c6");
    }

    #[test]
    fn parse_move_round_trip() {
        let mut board = Board::initial_position();
        let mov = board.parse_move("e2e4");
        assert_ne!(mov, NO_MOVE);
        assert!(mov.is_pawn_start());
        assert!(board.make_move(mov));

        assert_eq!(board.parse_move("e2e5"), NO_MOVE);
        assert_eq!(board.parse_move("xyzt"), NO_MOVE);
        assert_eq!(board.parse_move(""), NO_MOVE);
    }

    #[test]
    fn parse_move_promotion_suffix() {
        let board = Board::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let queen = board.parse_move("a7a8q");
        assert_eq!(queen.promoted(), WQ);
        let knight = board.parse_move("a7a8n");
        assert_eq!(knight.promoted(), WN);
        // A promotion without suffix is ambiguous
        assert_eq!(board.parse_move("a7a8"), NO_MOVE);
    }

    #[test]
    fn move_exists_filters_illegal_moves() {
        // The e-file knight is pinned by the rook
        let mut board = Board::from_fen("4r2k/8/8/8/8/4N3/8/4K3 w - - 0 1").unwrap();
        let quiet = Move::new(
            from_file_rank(4, 2),
            from_file_rank(2, 3),
            Piece::Empty,
            Piece::Empty,
            0,
        );
        assert!(!board.move_exists(quiet));

        let mut board = Board::initial_position();
        let mov = board.parse_move("g1f3");
        assert!(board.move_exists(mov));
    }
}
