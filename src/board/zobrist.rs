//! Zobrist keys for position hashing
//!
// The key is maintained incrementally by make/unmake and can always be
// recomputed from scratch, the consistency check relies on both paths
// agreeing. See https://www.chessprogramming.org/Zobrist_Hashing

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use board::Board;
use types::*;

// Fixed seed so keys are reproducible from run to run
const ZOBRIST_SEED: u64 = 0x40ab_5a95_e2b6_0c37;

pub struct ZobristKeys {
    /// One key per (piece, mailbox square). The `Empty` row doubles as
    /// the en passant keys since no real piece ever hashes with it.
    pub pieces: [[u64; BOARD_SQ_NUM]; 13],
    /// Hashed in when White is to move
    pub side: u64,
    /// One key per castling rights bitfield value
    pub castle: [u64; 16],
}

lazy_static! {
    pub static ref ZOBRIST: ZobristKeys = ZobristKeys::generate();
}

impl ZobristKeys {
    fn generate() -> ZobristKeys {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

        let mut pieces = [[0u64; BOARD_SQ_NUM]; 13];
        for piece_keys in pieces.iter_mut() {
            for key in piece_keys.iter_mut() {
                *key = rng.gen();
            }
        }

        let side = rng.gen();

        let mut castle = [0u64; 16];
        for key in castle.iter_mut() {
            *key = rng.gen();
        }

        ZobristKeys {
            pieces,
            side,
            castle,
        }
    }

    pub fn en_passant(&self, sq: Square) -> u64 {
        self.pieces[Piece::Empty as usize][sq as usize]
    }
}

/// Computes the position key from scratch
pub fn generate_position_key(board: &Board) -> u64 {
    let mut key = 0u64;

    for sq in 0..BOARD_SQ_NUM {
        let piece = board.pieces[sq];
        if piece != Piece::Empty && piece != Piece::OffBoard {
            key ^= ZOBRIST.pieces[piece as usize][sq];
        }
    }

    if board.side == Color::White {
        key ^= ZOBRIST.side;
    }

    if board.en_passant != NO_SQ {
        debug_assert!(board.en_passant.on_board());
        key ^= ZOBRIST.en_passant(board.en_passant);
    }

    key ^= ZOBRIST.castle[board.castle_perm as usize];

    key
}
