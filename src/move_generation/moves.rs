// Module holding the move encoding

use std::fmt;

use enum_primitive::FromPrimitive;
use stackvector::StackVec;

use types::*;

// A Move is a 32 bits word with the following layout, LSB first:
// from6 .. from0 | to6 .. to0 | capt3 .. capt0 | ep | ps | prom3 .. prom0 | csl
//    6  ..  0    | 13  ..  7  |   17  ..  14   | 18 | 19 |   23  ..  20   | 24
// Squares are mailbox indices, captured and promoted pieces are packed
// as 4-bit piece values.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Move(u32);

/// The absent move, no real move encodes to zero
pub const NO_MOVE: Move = Move(0);

/// En passant capture flag
pub const EP_FLAG: u32 = 0x40000;
/// Double pawn push flag
pub const PAWN_START_FLAG: u32 = 0x80000;
/// Castling flag
pub const CASTLE_FLAG: u32 = 0x0100_0000;

// Any capture: the captured piece nibble or the en passant flag
const CAPTURE_MASK: u32 = 0x7C000;
const PROMOTION_MASK: u32 = 0x00F0_0000;

impl Move {
    pub fn new(from: Square, to: Square, captured: Piece, promoted: Piece, flags: u32) -> Move {
        Move(
            u32::from(from)
                | u32::from(to) << 7
                | (captured as u32) << 14
                | (promoted as u32) << 20
                | flags,
        )
    }

    pub fn from_sq(self) -> Square {
        (self.0 & 0x7F) as Square
    }

    pub fn to_sq(self) -> Square {
        (self.0 >> 7 & 0x7F) as Square
    }

    /// The captured piece, `Empty` for non-captures and en passant
    pub fn captured(self) -> Piece {
        Piece::from_u32(self.0 >> 14 & 0xF).unwrap()
    }

    /// The promotion piece, `Empty` when the move is not a promotion
    pub fn promoted(self) -> Piece {
        Piece::from_u32(self.0 >> 20 & 0xF).unwrap()
    }

    pub fn is_capture(self) -> bool {
        self.0 & CAPTURE_MASK != 0
    }

    pub fn is_en_passant(self) -> bool {
        self.0 & EP_FLAG != 0
    }

    pub fn is_pawn_start(self) -> bool {
        self.0 & PAWN_START_FLAG != 0
    }

    pub fn is_promotion(self) -> bool {
        self.0 & PROMOTION_MASK != 0
    }

    pub fn is_castle(self) -> bool {
        self.0 & CASTLE_FLAG != 0
    }
}

// Coordinate notation, the promotion piece is a lowercase suffix
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", SqWrapper(self.from_sq()), SqWrapper(self.to_sq()))?;
        let promoted = self.promoted();
        if promoted != Piece::Empty {
            write!(f, "{}", promoted.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// A generated move with its ordering score
#[derive(Copy, Clone)]
pub struct ScoredMove {
    pub mov: Move,
    pub score: i32,
}

/// Stack-allocated list of the moves of one position
pub type MoveList = StackVec<[ScoredMove; MAX_POSITION_MOVES]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_round_trip() {
        let mov = Move::new(E1, G1, Piece::Empty, Piece::Empty, CASTLE_FLAG);
        assert_eq!(mov.from_sq(), E1);
        assert_eq!(mov.to_sq(), G1);
        assert!(mov.is_castle());
        assert!(!mov.is_capture());
        assert!(!mov.is_promotion());

        let mov = Move::new(from_file_rank(4, 6), E8, BR, WQ, 0);
        assert_eq!(mov.captured(), BR);
        assert_eq!(mov.promoted(), WQ);
        assert!(mov.is_capture());
        assert!(mov.is_promotion());

        let mov = Move::new(from_file_rank(4, 4), from_file_rank(3, 5), Piece::Empty, Piece::Empty, EP_FLAG);
        assert!(mov.is_en_passant());
        assert!(mov.is_capture());
        assert_eq!(mov.captured(), Piece::Empty);
    }

    #[test]
    fn display_coordinate_notation() {
        let mov = Move::new(from_file_rank(4, 1), from_file_rank(4, 3), Piece::Empty, Piece::Empty, PAWN_START_FLAG);
        assert_eq!(format!("{}", mov), "e2e4");

        let mov = Move::new(from_file_rank(4, 6), E8, Piece::Empty, WQ, 0);
        assert_eq!(format!("{}", mov), "e7e8q");

        let mov = Move::new(from_file_rank(0, 1), from_file_rank(1, 0), WN, BN, 0);
        assert_eq!(format!("{}", mov), "a2b1n");
    }
}
