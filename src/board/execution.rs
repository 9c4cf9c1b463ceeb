//! Making and unmaking moves
//!
// make_move is the single legality gate of the engine: generation is
// pseudo-legal and a move leaving the mover's king attacked is undone
// here and reported as illegal.

use board::zobrist::ZOBRIST;
use board::{Board, Undo};
use move_generation::moves::{Move, NO_MOVE};
use types::*;

// Castling rights mask indexed by mailbox square: moving a piece from
// or to one of the king/rook home squares clears the matching rights.
const fn build_castle_mask() -> [u8; BOARD_SQ_NUM] {
    let mut table = [15u8; BOARD_SQ_NUM];
    table[A1 as usize] = 13;
    table[E1 as usize] = 12;
    table[H1 as usize] = 14;
    table[A8 as usize] = 7;
    table[E8 as usize] = 3;
    table[H8 as usize] = 11;
    table
}

static CASTLE_PERM_MASK: [u8; BOARD_SQ_NUM] = build_castle_mask();

// Incremental Zobrist updates
impl Board {
    fn hash_piece(&mut self, piece: Piece, sq: Square) {
        self.key ^= ZOBRIST.pieces[piece as usize][sq as usize];
    }

    fn hash_side(&mut self) {
        self.key ^= ZOBRIST.side;
    }

    fn hash_en_passant(&mut self) {
        self.key ^= ZOBRIST.en_passant(self.en_passant);
    }

    fn hash_castle(&mut self) {
        self.key ^= ZOBRIST.castle[self.castle_perm as usize];
    }
}

// Piece manipulation keeping every redundant structure in sync
impl Board {
    fn clear_piece(&mut self, sq: Square) {
        let piece = self.pieces[sq as usize];
        debug_assert!(piece != Piece::Empty && piece != Piece::OffBoard);

        let color = piece.color() as usize;

        self.hash_piece(piece, sq);
        self.pieces[sq as usize] = Piece::Empty;
        self.material[color] -= piece.value();

        if piece.is_big() {
            self.big_pieces[color] -= 1;
            if piece.is_major() {
                self.major_pieces[color] -= 1;
            } else {
                self.minor_pieces[color] -= 1;
            }
        } else {
            self.pawns[color].clear_bit(sq.to_sq64());
            self.pawns[Color::Both as usize].clear_bit(sq.to_sq64());
        }

        // Remove from the piece list by swapping with the last entry
        let count = self.piece_count[piece as usize] as usize;
        let list = &mut self.piece_list[piece as usize];
        let mut index = count;
        for i in 0..count {
            if list[i] == sq {
                index = i;
                break;
            }
        }
        debug_assert!(index < count, "piece list out of sync with the mailbox");
        list[index] = list[count - 1];
        self.piece_count[piece as usize] -= 1;
    }

    fn add_piece(&mut self, sq: Square, piece: Piece) {
        debug_assert!(piece != Piece::Empty && piece != Piece::OffBoard);
        debug_assert!(self.pieces[sq as usize] == Piece::Empty);

        let color = piece.color() as usize;

        self.hash_piece(piece, sq);
        self.pieces[sq as usize] = piece;
        self.material[color] += piece.value();

        if piece.is_big() {
            self.big_pieces[color] += 1;
            if piece.is_major() {
                self.major_pieces[color] += 1;
            } else {
                self.minor_pieces[color] += 1;
            }
        } else {
            self.pawns[color].set_bit(sq.to_sq64());
            self.pawns[Color::Both as usize].set_bit(sq.to_sq64());
        }

        let count = self.piece_count[piece as usize] as usize;
        self.piece_list[piece as usize][count] = sq;
        self.piece_count[piece as usize] += 1;
    }

    fn move_piece(&mut self, from: Square, to: Square) {
        let piece = self.pieces[from as usize];
        debug_assert!(piece != Piece::Empty && piece != Piece::OffBoard);
        debug_assert!(self.pieces[to as usize] == Piece::Empty);

        let color = piece.color() as usize;

        self.hash_piece(piece, from);
        self.pieces[from as usize] = Piece::Empty;
        self.hash_piece(piece, to);
        self.pieces[to as usize] = piece;

        if !piece.is_big() {
            self.pawns[color].clear_bit(from.to_sq64());
            self.pawns[Color::Both as usize].clear_bit(from.to_sq64());
            self.pawns[color].set_bit(to.to_sq64());
            self.pawns[Color::Both as usize].set_bit(to.to_sq64());
        }

        let count = self.piece_count[piece as usize] as usize;
        let list = &mut self.piece_list[piece as usize];
        for entry in list[..count].iter_mut() {
            if *entry == from {
                *entry = to;
                return;
            }
        }
        debug_assert!(false, "piece list out of sync with the mailbox");
    }
}

impl Board {
    /// Plays a pseudo-legal move. Returns false and restores the
    /// position when the move leaves the mover's king attacked.
    pub fn make_move(&mut self, mov: Move) -> bool {
        self.debug_check();

        let from = mov.from_sq();
        let to = mov.to_sq();
        let side = self.side;

        debug_assert!(from.on_board() && to.on_board());

        self.history.push(Undo {
            mov,
            castle_perm: self.castle_perm,
            en_passant: self.en_passant,
            fifty_move: self.fifty_move,
            key: self.key,
        });

        if mov.is_en_passant() {
            if side == Color::White {
                self.clear_piece(to - 10);
            } else {
                self.clear_piece(to + 10);
            }
        } else if mov.is_castle() {
            match to {
                C1 => self.move_piece(A1, D1),
                C8 => self.move_piece(A8, D8),
                G1 => self.move_piece(H1, F1),
                G8 => self.move_piece(H8, F8),
                _ => panic!("castling move to a non-castling square"),
            }
        }

        if self.en_passant != NO_SQ {
            self.hash_en_passant();
        }
        self.hash_castle();

        self.castle_perm &= CASTLE_PERM_MASK[from as usize];
        self.castle_perm &= CASTLE_PERM_MASK[to as usize];
        self.en_passant = NO_SQ;

        self.hash_castle();

        self.fifty_move += 1;

        let captured = mov.captured();
        if captured != Piece::Empty {
            self.clear_piece(to);
            self.fifty_move = 0;
        }

        self.ply += 1;

        if self.pieces[from as usize].is_pawn() {
            self.fifty_move = 0;
            if mov.is_pawn_start() {
                self.en_passant = if side == Color::White {
                    from + 10
                } else {
                    from - 10
                };
                self.hash_en_passant();
            }
        }

        self.move_piece(from, to);

        let promoted = mov.promoted();
        if promoted != Piece::Empty {
            debug_assert!(!promoted.is_pawn() && !promoted.is_king());
            self.clear_piece(to);
            self.add_piece(to, promoted);
        }

        if self.pieces[to as usize].is_king() {
            self.king_sq[side as usize] = to;
        }

        self.side = side.swap();
        self.hash_side();

        if self.is_square_attacked(self.king_sq[side as usize], self.side) {
            self.take_move();
            return false;
        }

        self.debug_check();
        true
    }

    /// Unmakes the last made move
    pub fn take_move(&mut self) {
        self.debug_check();

        let undo = self.history.pop();
        self.ply -= 1;

        let mov = undo.mov;
        let from = mov.from_sq();
        let to = mov.to_sq();

        if self.en_passant != NO_SQ {
            self.hash_en_passant();
        }
        self.hash_castle();

        self.castle_perm = undo.castle_perm;
        self.fifty_move = undo.fifty_move;
        self.en_passant = undo.en_passant;

        if self.en_passant != NO_SQ {
            self.hash_en_passant();
        }
        self.hash_castle();

        self.side = self.side.swap();
        self.hash_side();

        if mov.is_en_passant() {
            if self.side == Color::White {
                self.add_piece(to - 10, BP);
            } else {
                self.add_piece(to + 10, WP);
            }
        } else if mov.is_castle() {
            match to {
                C1 => self.move_piece(D1, A1),
                C8 => self.move_piece(D8, A8),
                G1 => self.move_piece(F1, H1),
                G8 => self.move_piece(F8, H8),
                _ => panic!("castling move to a non-castling square"),
            }
        }

        self.move_piece(to, from);

        if self.pieces[from as usize].is_king() {
            self.king_sq[self.side as usize] = from;
        }

        let captured = mov.captured();
        if captured != Piece::Empty {
            self.add_piece(to, captured);
        }

        let promoted = mov.promoted();
        if promoted != Piece::Empty {
            self.clear_piece(from);
            self.add_piece(
                from,
                if promoted.color() == Color::White {
                    WP
                } else {
                    BP
                },
            );
        }

        debug_assert_eq!(self.key, undo.key);
        self.debug_check();
    }

    /// Passes the turn without moving, used by null move pruning. The
    /// record pushed on the history stack keeps repetition detection
    /// exact across the null move.
    pub fn make_null_move(&mut self) {
        debug_assert!(!self.in_check());
        self.debug_check();

        self.ply += 1;
        self.history.push(Undo {
            mov: NO_MOVE,
            castle_perm: self.castle_perm,
            en_passant: self.en_passant,
            fifty_move: self.fifty_move,
            key: self.key,
        });

        if self.en_passant != NO_SQ {
            self.hash_en_passant();
        }
        self.en_passant = NO_SQ;

        self.side = self.side.swap();
        self.hash_side();

        self.debug_check();
    }

    /// Unmakes a null move
    pub fn take_null_move(&mut self) {
        self.debug_check();

        let undo = self.history.pop();
        self.ply -= 1;

        self.castle_perm = undo.castle_perm;
        self.fifty_move = undo.fifty_move;
        self.en_passant = undo.en_passant;

        if self.en_passant != NO_SQ {
            self.hash_en_passant();
        }

        self.side = self.side.swap();
        self.hash_side();

        debug_assert_eq!(self.key, undo.key);
        self.debug_check();
    }
}
