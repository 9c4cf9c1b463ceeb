//! Static position evaluation
//!
//! Material counting plus piece-square tables, pawn structure, open
//! files for the heavy pieces, king placement by game phase and the
//! bishop pair. Scores are centipawns from the point of view of the
//! side to move.


use array_init::array_init;

use board::Board;
use types::*;

const PAWN_ISOLATED: i32 = -10;
const PAWN_PASSED: [i32; 8] = [0, 5, 10, 20, 35, 60, 100, 200];
const ROOK_OPEN_FILE: i32 = 10;
const ROOK_SEMI_OPEN_FILE: i32 = 5;
const QUEEN_OPEN_FILE: i32 = 5;
const QUEEN_SEMI_OPEN_FILE: i32 = 3;
const BISHOP_PAIR: i32 = 30;

// The king leaves the opening table once the opponent is down to
// roughly a rook, two knights and two pawns besides the king
const ENDGAME_MATERIAL: i32 = 550 + 2 * 325 + 2 * 100 + 50_000;

// Piece-square tables, from white's point of view with a1 first.
// Black uses the vertically mirrored square.
#[cfg_attr(rustfmt, rustfmt_skip)]
const PAWN_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
    10,  10,   0, -10, -10,   0,  10,  10,
     5,   0,   0,   5,   5,   0,   0,   5,
     0,   0,  10,  20,  20,  10,   0,   0,
     5,   5,   5,  10,  10,   5,   5,   5,
    10,  10,  10,  20,  20,  10,  10,  10,
    20,  20,  20,  30,  30,  20,  20,  20,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[cfg_attr(rustfmt, rustfmt_skip)]
const KNIGHT_TABLE: [i32; 64] = [
     0, -10,   0,   0,   0,   0, -10,   0,
     0,   0,   0,   5,   5,   0,   0,   0,
     0,   0,  10,  10,  10,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   5,   0,
     5,  10,  15,  20,  20,  15,  10,   5,
     5,  10,  10,  20,  20,  10,  10,   5,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[cfg_attr(rustfmt, rustfmt_skip)]
const BISHOP_TABLE: [i32; 64] = [
     0,   0, -10,   0,   0, -10,   0,   0,
     0,   0,   0,  10,  10,   0,   0,   0,
     0,   0,  10,  15,  15,  10,   0,   0,
     0,  10,  15,  20,  20,  15,  10,   0,
     0,  10,  15,  20,  20,  15,  10,   0,
     0,   0,  10,  15,  15,  10,   0,   0,
     0,   0,   0,  10,  10,   0,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[cfg_attr(rustfmt, rustfmt_skip)]
const ROOK_TABLE: [i32; 64] = [
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
    25,  25,  25,  25,  25,  25,  25,  25,
     0,   0,   5,  10,  10,   5,   0,   0,
];

#[cfg_attr(rustfmt, rustfmt_skip)]
const KING_ENDGAME_TABLE: [i32; 64] = [
   -50, -10,   0,   0,   0,   0, -10, -50,
   -10,   0,  10,  10,  10,  10,   0, -10,
     0,  10,  20,  20,  20,  20,  10,   0,
     0,  10,  20,  40,  40,  20,  10,   0,
     0,  10,  20,  40,  40,  20,  10,   0,
     0,  10,  20,  20,  20,  20,  10,   0,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -50, -10,   0,   0,   0,   0, -10, -50,
];

#[cfg_attr(rustfmt, rustfmt_skip)]
const KING_OPENING_TABLE: [i32; 64] = [
     0,   5,   5, -10, -10,   0,  10,   5,
   -30, -30, -30, -30, -30, -30, -30, -30,
   -50, -50, -50, -50, -50, -50, -50, -50,
   -70, -70, -70, -70, -70, -70, -70, -70,
   -70, -70, -70, -70, -70, -70, -70, -70,
   -70, -70, -70, -70, -70, -70, -70, -70,
   -70, -70, -70, -70, -70, -70, -70, -70,
   -70, -70, -70, -70, -70, -70, -70, -70,
];

lazy_static! {
    static ref FILE_BB_MASK: [BitBoard; 8] = array_init(file_mask);
    static ref ISOLATED_MASK: [BitBoard; 64] = array_init(neighbour_files_mask);
    static ref WHITE_PASSED_MASK: [BitBoard; 64] = array_init(|sq64| front_span(sq64, true));
    static ref BLACK_PASSED_MASK: [BitBoard; 64] = array_init(|sq64| front_span(sq64, false));
}

fn file_mask(file: usize) -> BitBoard {
    let mut mask: BitBoard = 0;
    for rank in 0..8u8 {
        mask.set_bit(rank * 8 + file as u8);
    }
    mask
}

// Files next to the pawn, a friendly pawn anywhere on them breaks
// isolation
fn neighbour_files_mask(sq64: usize) -> BitBoard {
    let file = sq64 % 8;
    let mut mask = 0;
    if file > 0 {
        mask |= file_mask(file - 1);
    }
    if file < 7 {
        mask |= file_mask(file + 1);
    }
    mask
}

// Squares an enemy pawn would have to hold to stop this pawn: own and
// neighbour files, every rank ahead in the push direction
fn front_span(sq64: usize, white: bool) -> BitBoard {
    let file = sq64 as isize % 8;
    let rank = sq64 as isize / 8;
    let (first, last) = if white { (rank + 1, 8) } else { (0, rank) };

    let mut mask: BitBoard = 0;
    for f in file - 1..=file + 1 {
        if f < 0 || f > 7 {
            continue;
        }
        for r in first..last {
            mask.set_bit((r * 8 + f) as u8);
        }
    }

    mask
}

impl Board {
    // Insufficient mating material on both sides, following the
    // sjeng 11.2 rules
    fn material_draw(&self) -> bool {
        let count = |piece: Piece| i32::from(self.piece_count[piece as usize]);

        if count(WR) == 0 && count(BR) == 0 && count(WQ) == 0 && count(BQ) == 0 {
            if count(WB) == 0 && count(BB) == 0 {
                if count(WN) < 3 && count(BN) < 3 {
                    return true;
                }
            } else if count(WN) == 0 && count(BN) == 0 {
                if (count(WB) - count(BB)).abs() < 2 {
                    return true;
                }
            } else if (count(WN) < 3 && count(WB) == 0) || (count(WB) == 1 && count(WN) == 0) {
                if (count(BN) < 3 && count(BB) == 0) || (count(BB) == 1 && count(BN) == 0) {
                    return true;
                }
            }
        } else if count(WQ) == 0 && count(BQ) == 0 {
            if count(WR) == 1 && count(BR) == 1 {
                if count(WN) + count(WB) < 2 && count(BN) + count(BB) < 2 {
                    return true;
                }
            } else if count(WR) == 1 && count(BR) == 0 {
                if count(WN) + count(WB) == 0
                    && (count(BN) + count(BB) == 1 || count(BN) + count(BB) == 2)
                {
                    return true;
                }
            } else if count(BR) == 1 && count(WR) == 0 {
                if count(BN) + count(BB) == 0
                    && (count(WN) + count(WB) == 1 || count(WN) + count(WB) == 2)
                {
                    return true;
                }
            }
        }

        false
    }

    fn piece_squares(&self, piece: Piece) -> &[Square] {
        &self.piece_list[piece as usize][..self.piece_count[piece as usize] as usize]
    }

    /// Evaluates the position in centipawns from the point of view of
    /// the side to move
    pub fn evaluate(&self) -> i32 {
        self.debug_check();

        let white = Color::White as usize;
        let black = Color::Black as usize;
        let both = Color::Both as usize;

        let mut score = self.material[white] - self.material[black];

        if self.piece_count[WP as usize] == 0
            && self.piece_count[BP as usize] == 0
            && self.material_draw()
        {
            return 0;
        }

        for &sq in self.piece_squares(WP) {
            let sq64 = sq.to_sq64() as usize;
            score += PAWN_TABLE[sq64];

            if ISOLATED_MASK[sq64] & self.pawns[white] == 0 {
                score += PAWN_ISOLATED;
            }
            if WHITE_PASSED_MASK[sq64] & self.pawns[black] == 0 {
                score += PAWN_PASSED[sq.rank() as usize];
            }
        }

        for &sq in self.piece_squares(BP) {
            let sq64 = sq.to_sq64() as usize;
            score -= PAWN_TABLE[mirror64(sq64 as u8) as usize];

            if ISOLATED_MASK[sq64] & self.pawns[black] == 0 {
                score -= PAWN_ISOLATED;
            }
            if BLACK_PASSED_MASK[sq64] & self.pawns[white] == 0 {
                score -= PAWN_PASSED[7 - sq.rank() as usize];
            }
        }

        for &sq in self.piece_squares(WN) {
            score += KNIGHT_TABLE[sq.to_sq64() as usize];
        }
        for &sq in self.piece_squares(BN) {
            score -= KNIGHT_TABLE[mirror64(sq.to_sq64()) as usize];
        }

        for &sq in self.piece_squares(WB) {
            score += BISHOP_TABLE[sq.to_sq64() as usize];
        }
        for &sq in self.piece_squares(BB) {
            score -= BISHOP_TABLE[mirror64(sq.to_sq64()) as usize];
        }

        for &sq in self.piece_squares(WR) {
            score += ROOK_TABLE[sq.to_sq64() as usize];

            let file = FILE_BB_MASK[sq.file() as usize];
            if self.pawns[both] & file == 0 {
                score += ROOK_OPEN_FILE;
            } else if self.pawns[white] & file == 0 {
                score += ROOK_SEMI_OPEN_FILE;
            }
        }
        for &sq in self.piece_squares(BR) {
            score -= ROOK_TABLE[mirror64(sq.to_sq64()) as usize];

            let file = FILE_BB_MASK[sq.file() as usize];
            if self.pawns[both] & file == 0 {
                score -= ROOK_OPEN_FILE;
            } else if self.pawns[black] & file == 0 {
                score -= ROOK_SEMI_OPEN_FILE;
            }
        }

        for &sq in self.piece_squares(WQ) {
            let file = FILE_BB_MASK[sq.file() as usize];
            if self.pawns[both] & file == 0 {
                score += QUEEN_OPEN_FILE;
            } else if self.pawns[white] & file == 0 {
                score += QUEEN_SEMI_OPEN_FILE;
            }
        }
        for &sq in self.piece_squares(BQ) {
            let file = FILE_BB_MASK[sq.file() as usize];
            if self.pawns[both] & file == 0 {
                score -= QUEEN_OPEN_FILE;
            } else if self.pawns[black] & file == 0 {
                score -= QUEEN_SEMI_OPEN_FILE;
            }
        }

        let king64 = self.king_sq[white].to_sq64() as usize;
        if self.material[black] <= ENDGAME_MATERIAL {
            score += KING_ENDGAME_TABLE[king64];
        } else {
            score += KING_OPENING_TABLE[king64];
        }

        let king64 = mirror64(self.king_sq[black].to_sq64()) as usize;
        if self.material[white] <= ENDGAME_MATERIAL {
            score -= KING_ENDGAME_TABLE[king64];
        } else {
            score -= KING_OPENING_TABLE[king64];
        }

        if self.piece_count[WB as usize] >= 2 {
            score += BISHOP_PAIR;
        }
        if self.piece_count[BB as usize] >= 2 {
            score -= BISHOP_PAIR;
        }

        if self.side == Color::White {
            score
        } else {
            -score
        }
    }
}
