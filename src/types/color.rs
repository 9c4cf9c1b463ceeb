//! The color of a player

/*
 * Both is a valid index on purpose, the pawn bitboards are stored as
 * a 3-sized array with a combined set at index 2.
 */

enum_from_primitive! {
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black,
    Both,
}
}

impl Color {
    /// Returns the opponent's color
    pub fn swap(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
            Color::Both => Color::Both,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
            Color::Both => '-',
        }
    }
}
