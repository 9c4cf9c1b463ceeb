#![allow(clippy::unreadable_literal)]

pub mod bitboard;
pub mod color;
pub mod piece;
pub mod square;

pub use self::bitboard::*;
pub use self::color::*;
pub use self::piece::*;
pub use self::square::*;

/// Hard bound on the search depth in plies
pub const MAX_DEPTH: usize = 64;
/// Hard bound on the number of half moves in a game
pub const MAX_GAME_MOVES: usize = 2048;
/// Upper bound on the number of pseudo-legal moves in a single position
pub const MAX_POSITION_MOVES: usize = 256;

/// A score outside of anything the evaluation can produce
pub const INFINITE: i32 = 30_000;
/// Scores above this bound are mate scores encoding a distance to mate
pub const IS_MATE: i32 = INFINITE - MAX_DEPTH as i32;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
