use std::fmt;
use std::ops::Deref;

use move_generation::moves::{Move, NO_MOVE};
use types::*;

pub mod attack;
pub mod execution;
pub mod fen;
pub mod validate;
pub mod zobrist;

// The board is a hybrid representation:
// - a 120-square mailbox array for fast piece lookup and ray walking
//   (see https://www.chessprogramming.org/10x12_Board)
// - piece lists for fast iteration over the pieces of one type
// - pawn bitboards for the evaluation
// Counters (material, big/major/minor pieces) and the Zobrist key are
// maintained incrementally by make/unmake.

/// White kingside castling right
pub const WKCA: u8 = 1;
/// White queenside castling right
pub const WQCA: u8 = 2;
/// Black kingside castling right
pub const BKCA: u8 = 4;
/// Black queenside castling right
pub const BQCA: u8 = 8;

/// Everything needed to restore the position before a move was made
#[derive(Copy, Clone)]
pub struct Undo {
    pub mov: Move,
    pub castle_perm: u8,
    pub en_passant: Square,
    pub fifty_move: u32,
    pub key: u64,
}

/// Game history as a stack of undo records.
/// Unmaking with no move played is a programmer error and aborts
/// instead of silently corrupting the position.
#[derive(Clone)]
pub struct UndoStack(Vec<Undo>);

impl UndoStack {
    fn new() -> UndoStack {
        UndoStack(Vec::with_capacity(MAX_GAME_MOVES))
    }

    pub fn push(&mut self, undo: Undo) {
        assert!(self.0.len() < MAX_GAME_MOVES, "game history overflow");
        self.0.push(undo);
    }

    pub fn pop(&mut self) -> Undo {
        self.0
            .pop()
            .expect("unmake called with an empty history stack")
    }
}

impl Deref for UndoStack {
    type Target = [Undo];

    fn deref(&self) -> &[Undo] {
        &self.0
    }
}

#[derive(Clone)]
pub struct Board {
    /// Mailbox array, border squares hold `Piece::OffBoard`
    pub pieces: [Piece; BOARD_SQ_NUM],
    /// Pawn sets for White, Black and both combined
    pub pawns: [BitBoard; 3],
    pub king_sq: [Square; 2],

    pub side: Color,
    pub en_passant: Square,
    pub fifty_move: u32,
    /// Search depth from the root position
    pub ply: usize,

    pub castle_perm: u8,
    /// Zobrist key of the current position
    pub key: u64,

    /// Squares of every piece of each type
    pub piece_list: [[Square; 10]; 13],
    pub piece_count: [u8; 13],
    /// Non-pawn piece count per color
    pub big_pieces: [u8; 2],
    /// Rook, queen and king count per color
    pub major_pieces: [u8; 2],
    /// Knight and bishop count per color
    pub minor_pieces: [u8; 2],
    /// Material count in centipawns per color
    pub material: [i32; 2],

    pub history: UndoStack,

    // Move ordering state owned by the board so generation can score
    // quiet moves without a search context
    pub search_killers: [[Move; MAX_DEPTH]; 2],
    pub search_history: [[i32; BOARD_SQ_NUM]; 13],
}

impl Board {
    /// Returns an empty board with no pieces and no side to move
    pub fn new() -> Board {
        let mut pieces = [Piece::OffBoard; BOARD_SQ_NUM];
        for sq64 in 0..64 {
            pieces[from_sq64(sq64) as usize] = Piece::Empty;
        }

        Board {
            pieces,
            pawns: [0; 3],
            king_sq: [NO_SQ; 2],

            side: Color::Both,
            en_passant: NO_SQ,
            fifty_move: 0,
            ply: 0,

            castle_perm: 0,
            key: 0,

            piece_list: [[NO_SQ; 10]; 13],
            piece_count: [0; 13],
            big_pieces: [0; 2],
            major_pieces: [0; 2],
            minor_pieces: [0; 2],
            material: [0; 2],

            history: UndoStack::new(),

            search_killers: [[NO_MOVE; MAX_DEPTH]; 2],
            search_history: [[0; BOARD_SQ_NUM]; 13],
        }
    }

    /// Returns the initial chess position
    pub fn initial_position() -> Board {
        Board::from_fen(START_FEN).expect("the initial position FEN is valid")
    }

    /// Derives the piece lists, counters, pawn bitboards, material and
    /// king squares from the mailbox array
    pub fn update_lists_material(&mut self) {
        for sq in 0..BOARD_SQ_NUM {
            let piece = self.pieces[sq];
            if piece == Piece::OffBoard || piece == Piece::Empty {
                continue;
            }

            let color = piece.color() as usize;
            if piece.is_big() {
                self.big_pieces[color] += 1;
                if piece.is_major() {
                    self.major_pieces[color] += 1;
                } else {
                    self.minor_pieces[color] += 1;
                }
            }
            self.material[color] += piece.value();

            let count = self.piece_count[piece as usize] as usize;
            debug_assert!(count < 10);
            self.piece_list[piece as usize][count] = sq as Square;
            self.piece_count[piece as usize] += 1;

            if piece == WK || piece == BK {
                self.king_sq[color] = sq as Square;
            }

            if piece.is_pawn() {
                let sq64 = (sq as Square).to_sq64();
                self.pawns[color].set_bit(sq64);
                self.pawns[Color::Both as usize].set_bit(sq64);
            }
        }
    }

    /// Flips the position top to bottom and swaps the colors of every
    /// piece, the side to move, the castling rights and the en passant
    /// square. Mirroring twice restores the original position and the
    /// evaluation must not change under mirroring.
    pub fn mirror(&mut self) {
        const SWAP_PIECE: [Piece; 13] = [
            Piece::Empty,
            BP,
            BN,
            BB,
            BR,
            BQ,
            BK,
            WP,
            WN,
            WB,
            WR,
            WQ,
            WK,
        ];

        let side = self.side.swap();

        let mut castle_perm = 0;
        if self.castle_perm & WKCA != 0 {
            castle_perm |= BKCA;
        }
        if self.castle_perm & WQCA != 0 {
            castle_perm |= BQCA;
        }
        if self.castle_perm & BKCA != 0 {
            castle_perm |= WKCA;
        }
        if self.castle_perm & BQCA != 0 {
            castle_perm |= WQCA;
        }

        let en_passant = if self.en_passant != NO_SQ {
            from_sq64(mirror64(self.en_passant.to_sq64()))
        } else {
            NO_SQ
        };

        let mut mirrored = [Piece::Empty; 64];
        for sq64 in 0..64u8 {
            mirrored[sq64 as usize] = self.pieces[from_sq64(mirror64(sq64)) as usize];
        }

        *self = Board::new();
        for sq64 in 0..64u8 {
            self.pieces[from_sq64(sq64) as usize] = SWAP_PIECE[mirrored[sq64 as usize] as usize];
        }

        self.side = side;
        self.castle_perm = castle_perm;
        self.en_passant = en_passant;

        self.update_lists_material();
        self.key = zobrist::generate_position_key(self);

        self.debug_check();
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0..8 {
                let piece = self.pieces[from_file_rank(file, rank) as usize];
                write!(f, "{:>3}", piece.to_char())?;
            }
            writeln!(f)?;
        }
        write!(f, "\n   ")?;
        for file in 0..8u8 {
            write!(f, "{:>3}", char::from(b'a' + file))?;
        }
        writeln!(f)?;
        writeln!(f, "side: {}", self.side.to_char())?;
        if self.en_passant != NO_SQ {
            writeln!(f, "en passant: {}", SqWrapper(self.en_passant))?;
        }
        writeln!(
            f,
            "castle: {}{}{}{}",
            if self.castle_perm & WKCA != 0 { 'K' } else { '-' },
            if self.castle_perm & WQCA != 0 { 'Q' } else { '-' },
            if self.castle_perm & BKCA != 0 { 'k' } else { '-' },
            if self.castle_perm & BQCA != 0 { 'q' } else { '-' },
        )?;
        writeln!(f, "key: {:016X}", self.key)
    }
}
