//! 64-bit pawn sets
//!
// Only the pawns get a bitboard, the evaluation wants fast file and
// span intersections for structure terms. Bits are indexed by the
// 0..64 square index, a1 is bit 0.

use types::square::Square;

pub type BitBoard = u64;

/// Public interface for `BitBoard`
pub trait BitBoardExt {
    fn set_bit(&mut self, sq64: u8);
    fn clear_bit(&mut self, sq64: u8);
    /// Removes and returns the lowest set bit
    fn pop_bit(&mut self) -> u8;
    fn has_bit(self, sq64: u8) -> bool;
    fn count(self) -> u8;
}

impl BitBoardExt for BitBoard {
    fn set_bit(&mut self, sq64: u8) {
        *self |= 1u64 << sq64;
    }

    fn clear_bit(&mut self, sq64: u8) {
        *self &= !(1u64 << sq64);
    }

    fn pop_bit(&mut self) -> u8 {
        let sq64 = self.trailing_zeros() as u8;
        *self &= *self - 1;
        sq64
    }

    fn has_bit(self, sq64: u8) -> bool {
        self & (1u64 << sq64) != 0
    }

    fn count(self) -> u8 {
        self.count_ones() as u8
    }
}

/// Pretty prints a bitboard from White's point of view, for debugging
#[allow(dead_code)]
pub fn format_bitboard(bitboard: BitBoard) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        for file in 0..8 {
            let sq64: Square = 8 * rank + file;
            out.push(if bitboard.has_bit(sq64) { 'X' } else { '-' });
        }
        out.push('\n');
    }
    out
}
