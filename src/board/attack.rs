//! Attack detection on the mailbox board
//!
// Offsets are mailbox deltas, walking off the playable area always
// lands on a border square holding the off-board sentinel.

use board::Board;
use types::*;

pub const KNIGHT_DIRS: [i16; 8] = [-8, -19, -21, -12, 8, 19, 21, 12];
pub const ROOK_DIRS: [i16; 4] = [-1, -10, 1, 10];
pub const BISHOP_DIRS: [i16; 4] = [-9, -11, 11, 9];
pub const KING_DIRS: [i16; 8] = [-1, -10, 1, 10, -9, -11, 11, 9];

impl Board {
    fn piece_at(&self, sq: i16) -> Piece {
        self.pieces[sq as usize]
    }

    /// Is `sq` attacked by a piece of `side`?
    pub fn is_square_attacked(&self, sq: Square, side: Color) -> bool {
        debug_assert!(sq.on_board());
        let sq = i16::from(sq);

        // Pawns
        if side == Color::White {
            if self.piece_at(sq - 11) == WP || self.piece_at(sq - 9) == WP {
                return true;
            }
        } else if self.piece_at(sq + 11) == BP || self.piece_at(sq + 9) == BP {
            return true;
        }

        // Knights
        for &dir in KNIGHT_DIRS.iter() {
            let piece = self.piece_at(sq + dir);
            if piece != Piece::OffBoard && piece.is_knight() && piece.color() == side {
                return true;
            }
        }

        // Rooks and queens
        for &dir in ROOK_DIRS.iter() {
            let mut t_sq = sq + dir;
            let mut piece = self.piece_at(t_sq);
            while piece != Piece::OffBoard {
                if piece != Piece::Empty {
                    if piece.is_rook_or_queen() && piece.color() == side {
                        return true;
                    }
                    break;
                }
                t_sq += dir;
                piece = self.piece_at(t_sq);
            }
        }

        // Bishops and queens
        for &dir in BISHOP_DIRS.iter() {
            let mut t_sq = sq + dir;
            let mut piece = self.piece_at(t_sq);
            while piece != Piece::OffBoard {
                if piece != Piece::Empty {
                    if piece.is_bishop_or_queen() && piece.color() == side {
                        return true;
                    }
                    break;
                }
                t_sq += dir;
                piece = self.piece_at(t_sq);
            }
        }

        // Kings
        for &dir in KING_DIRS.iter() {
            let piece = self.piece_at(sq + dir);
            if piece != Piece::OffBoard && piece.is_king() && piece.color() == side {
                return true;
            }
        }

        false
    }

    /// Is the side to move in check?
    pub fn in_check(&self) -> bool {
        self.is_square_attacked(self.king_sq[self.side as usize], self.side.swap())
    }
}

#[cfg(test)]
mod tests {
    use board::Board;
    use types::*;

    #[test]
    fn initial_position_attacks() {
        let board = Board::initial_position();

        // e4 is not attacked by anyone yet
        let e4 = from_file_rank(4, 3);
        assert!(!board.is_square_attacked(e4, Color::White));
        assert!(!board.is_square_attacked(e4, Color::Black));

        // f3 is covered by the g2 pawn and the g1 knight
        let f3 = from_file_rank(5, 2);
        assert!(board.is_square_attacked(f3, Color::White));
        assert!(!board.is_square_attacked(f3, Color::Black));

        assert!(!board.in_check());
    }

    #[test]
    fn sliding_attacks_stop_at_blockers() {
        let board = Board::from_fen("3k4/8/8/3r4/8/3P4/8/3K4 w - - 0 1").unwrap();

        // The rook on d5 hits d4 and d3 but the pawn shields the king
        assert!(board.is_square_attacked(from_file_rank(3, 3), Color::Black));
        assert!(board.is_square_attacked(from_file_rank(3, 2), Color::Black));
        assert!(!board.in_check());
    }

    #[test]
    fn check_detection() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4R3/4K3 b - - 0 1").unwrap();
        assert!(board.in_check());

        let board = Board::from_fen("4k3/8/8/8/8/8/3R4/4K3 b - - 0 1").unwrap();
        assert!(!board.in_check());
    }

    #[test]
    fn pawn_and_knight_attacks() {
        let board = Board::from_fen("4k3/8/8/3p4/8/4N3/8/4K3 w - - 0 1").unwrap();

        // The d5 pawn attacks c4 and e4
        assert!(board.is_square_attacked(from_file_rank(2, 3), Color::Black));
        assert!(board.is_square_attacked(from_file_rank(4, 3), Color::Black));
        assert!(!board.is_square_attacked(from_file_rank(3, 3), Color::Black));

        // The e3 knight attacks d5
        assert!(board.is_square_attacked(from_file_rank(3, 4), Color::White));
    }
}
