//! A classical alpha-beta chess engine on a 120-square mailbox board.
//!
//! The board keeps a mailbox array with an off-board border, piece lists
//! for fast iteration and pawn bitboards for the evaluation. Search is
//! iterative deepening negamax with a transposition table, null move
//! pruning, killer moves and history ordering.

#[macro_use]
extern crate enum_primitive;
#[macro_use]
extern crate lazy_static;
extern crate array_init;
extern crate rand;
extern crate stackvector;

pub mod board;
pub mod evaluation;
pub mod hash_tables;
pub mod move_generation;
pub mod search;
pub mod types;
