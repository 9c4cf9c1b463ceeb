//! The square representation
//!
/*
 * Squares index a 10x12 mailbox board. The playable squares run from
 * 21 (a1) to 98 (h8); the two-rank border at the top and bottom and
 * the one-file border on each side let move generation run offsets
 * without bound checks, any ray falling off the board lands on an
 * off-board sentinel square.
 */

use std::fmt;

/// A single square of the mailbox board
pub type Square = u8;
/// A wrapper for constant initialization, conversion and display
pub struct SqWrapper(pub Square);

/// Number of mailbox squares, border included
pub const BOARD_SQ_NUM: usize = 120;

/// The absent square, used for an unset en passant target
pub const NO_SQ: Square = 99;
/// Sentinel in the file and rank tables for border squares
pub const OFFBOARD: u8 = 100;

pub const FILE_A: u8 = 0;
pub const FILE_H: u8 = 7;
pub const RANK_1: u8 = 0;
pub const RANK_2: u8 = 1;
pub const RANK_3: u8 = 2;
pub const RANK_6: u8 = 5;
pub const RANK_7: u8 = 6;
pub const RANK_8: u8 = 7;

/// Creates a mailbox square from file and rank between 0 and 7.
/// Caution: The inputs are unchecked!
pub const fn from_file_rank(file: u8, rank: u8) -> Square {
    21 + file + 10 * rank
}

pub const A1: Square = from_file_rank(0, 0);
pub const B1: Square = from_file_rank(1, 0);
pub const C1: Square = from_file_rank(2, 0);
pub const D1: Square = from_file_rank(3, 0);
pub const E1: Square = from_file_rank(4, 0);
pub const F1: Square = from_file_rank(5, 0);
pub const G1: Square = from_file_rank(6, 0);
pub const H1: Square = from_file_rank(7, 0);
pub const A8: Square = from_file_rank(0, 7);
pub const B8: Square = from_file_rank(1, 7);
pub const C8: Square = from_file_rank(2, 7);
pub const D8: Square = from_file_rank(3, 7);
pub const E8: Square = from_file_rank(4, 7);
pub const F8: Square = from_file_rank(5, 7);
pub const G8: Square = from_file_rank(6, 7);
pub const H8: Square = from_file_rank(7, 7);

const fn build_sq120_to_sq64() -> [u8; BOARD_SQ_NUM] {
    let mut table = [65u8; BOARD_SQ_NUM];
    let mut rank = 0;
    let mut sq64 = 0;
    while rank < 8 {
        let mut file = 0;
        while file < 8 {
            table[from_file_rank(file, rank) as usize] = sq64;
            sq64 += 1;
            file += 1;
        }
        rank += 1;
    }
    table
}

const fn build_sq64_to_sq120() -> [Square; 64] {
    let mut table = [0u8; 64];
    let mut sq64 = 0;
    while sq64 < 64 {
        table[sq64 as usize] = from_file_rank(sq64 % 8, sq64 / 8);
        sq64 += 1;
    }
    table
}

const fn build_files_board() -> [u8; BOARD_SQ_NUM] {
    let mut table = [OFFBOARD; BOARD_SQ_NUM];
    let mut rank = 0;
    while rank < 8 {
        let mut file = 0;
        while file < 8 {
            table[from_file_rank(file, rank) as usize] = file;
            file += 1;
        }
        rank += 1;
    }
    table
}

const fn build_ranks_board() -> [u8; BOARD_SQ_NUM] {
    let mut table = [OFFBOARD; BOARD_SQ_NUM];
    let mut rank = 0;
    while rank < 8 {
        let mut file = 0;
        while file < 8 {
            table[from_file_rank(file, rank) as usize] = rank;
            file += 1;
        }
        rank += 1;
    }
    table
}

/// Mailbox index to 0..64 index, 65 for border squares
pub const SQ120_TO_SQ64: [u8; BOARD_SQ_NUM] = build_sq120_to_sq64();
/// 0..64 index back to the mailbox index
pub const SQ64_TO_SQ120: [Square; 64] = build_sq64_to_sq120();
/// File of each mailbox square, OFFBOARD on the border
pub const FILES_BOARD: [u8; BOARD_SQ_NUM] = build_files_board();
/// Rank of each mailbox square, OFFBOARD on the border
pub const RANKS_BOARD: [u8; BOARD_SQ_NUM] = build_ranks_board();

/// Mirrors a 0..64 square index through the horizontal axis
pub const fn mirror64(sq64: u8) -> u8 {
    sq64 ^ 56
}

/// Public `Square` interface
pub trait SquareExt {
    fn to_sq64(self) -> u8;
    fn file(self) -> u8;
    fn rank(self) -> u8;
    fn on_board(self) -> bool;
}

impl SquareExt for Square {
    fn to_sq64(self) -> u8 {
        SQ120_TO_SQ64[self as usize]
    }

    fn file(self) -> u8 {
        FILES_BOARD[self as usize]
    }

    fn rank(self) -> u8 {
        RANKS_BOARD[self as usize]
    }

    fn on_board(self) -> bool {
        (self as usize) < BOARD_SQ_NUM && RANKS_BOARD[self as usize] != OFFBOARD
    }
}

pub fn from_sq64(sq64: u8) -> Square {
    SQ64_TO_SQ120[sq64 as usize]
}

impl fmt::Display for SqWrapper {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.0.file()),
            char::from(b'1' + self.0.rank())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_tables_are_inverses() {
        for sq64 in 0..64 {
            assert_eq!(from_sq64(sq64).to_sq64(), sq64);
        }
        assert_eq!(A1, 21);
        assert_eq!(H1, 28);
        assert_eq!(A8, 91);
        assert_eq!(H8, 98);
    }

    #[test]
    fn files_and_ranks() {
        assert_eq!(E1.file(), 4);
        assert_eq!(E1.rank(), RANK_1);
        assert_eq!(H8.file(), FILE_H);
        assert_eq!(H8.rank(), RANK_8);
        assert_eq!(FILES_BOARD[0], OFFBOARD);
        assert_eq!(RANKS_BOARD[NO_SQ as usize], OFFBOARD);
    }

    #[test]
    fn square_display() {
        assert_eq!(format!("{}", SqWrapper(E1)), "e1");
        assert_eq!(format!("{}", SqWrapper(from_file_rank(3, 4))), "d5");
    }

    #[test]
    fn mirroring() {
        assert_eq!(mirror64(A1.to_sq64()), A8.to_sq64());
        assert_eq!(mirror64(E1.to_sq64()), E8.to_sq64());
        assert_eq!(mirror64(mirror64(42)), 42);
    }
}
