//! Full board consistency checking
//!
// Cross-checks every redundant structure of the board against the
// mailbox array. Way too slow to run per node in normal builds, the
// `consistency-checks` feature turns it on at every make/unmake.

use board::zobrist::generate_position_key;
use board::Board;
use types::*;

impl Board {
    /// Runs `check` when the crate is built with consistency checking,
    /// compiles to nothing otherwise
    #[inline]
    pub fn debug_check(&self) {
        #[cfg(feature = "consistency-checks")]
        self.check();
    }

    /// Asserts that every redundant structure agrees with the mailbox
    /// array and returns true, so it can be used inside `assert!`
    pub fn check(&self) -> bool {
        let mut piece_count = [0u8; 13];
        let mut big_pieces = [0u8; 2];
        let mut major_pieces = [0u8; 2];
        let mut minor_pieces = [0u8; 2];
        let mut material = [0i32; 2];

        // Every piece list entry points at a matching mailbox square
        for &piece in PIECES_LIST.iter() {
            for i in 0..self.piece_count[piece as usize] as usize {
                let sq = self.piece_list[piece as usize][i];
                assert!(sq.on_board());
                assert_eq!(self.pieces[sq as usize], piece);
            }
        }

        // Recount everything from the mailbox
        for sq64 in 0..64 {
            let piece = self.pieces[from_sq64(sq64) as usize];
            assert!(piece != Piece::OffBoard);
            if piece == Piece::Empty {
                continue;
            }

            piece_count[piece as usize] += 1;
            let color = piece.color() as usize;
            if piece.is_big() {
                big_pieces[color] += 1;
                if piece.is_major() {
                    major_pieces[color] += 1;
                } else {
                    minor_pieces[color] += 1;
                }
            }
            material[color] += piece.value();
        }

        assert_eq!(piece_count, self.piece_count);
        assert_eq!(big_pieces, self.big_pieces);
        assert_eq!(major_pieces, self.major_pieces);
        assert_eq!(minor_pieces, self.minor_pieces);
        assert_eq!(material, self.material);

        assert_eq!(piece_count[WK as usize], 1);
        assert_eq!(piece_count[BK as usize], 1);

        // Pawn bitboards carry exactly the pawns of the mailbox
        let white = Color::White as usize;
        let black = Color::Black as usize;
        let both = Color::Both as usize;

        assert_eq!(self.pawns[white].count(), self.piece_count[WP as usize]);
        assert_eq!(self.pawns[black].count(), self.piece_count[BP as usize]);
        assert_eq!(self.pawns[both], self.pawns[white] | self.pawns[black]);

        let mut white_pawns = self.pawns[white];
        while white_pawns != 0 {
            let sq64 = white_pawns.pop_bit();
            assert_eq!(self.pieces[from_sq64(sq64) as usize], WP);
        }
        let mut black_pawns = self.pawns[black];
        while black_pawns != 0 {
            let sq64 = black_pawns.pop_bit();
            assert_eq!(self.pieces[from_sq64(sq64) as usize], BP);
        }

        assert!(self.side == Color::White || self.side == Color::Black);
        assert_eq!(self.key, generate_position_key(self));

        assert!(
            self.en_passant == NO_SQ
                || (self.en_passant.rank() == RANK_6 && self.side == Color::White)
                || (self.en_passant.rank() == RANK_3 && self.side == Color::Black)
        );

        assert_eq!(self.pieces[self.king_sq[white] as usize], WK);
        assert_eq!(self.pieces[self.king_sq[black] as usize], BK);

        assert!(self.castle_perm <= 15);

        true
    }
}

#[cfg(test)]
mod tests {
    use board::Board;
    use types::*;

    #[test]
    fn valid_positions_pass() {
        assert!(Board::initial_position().check());
        assert!(
            Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap()
                .check()
        );
    }

    #[test]
    #[should_panic]
    fn corrupted_material_is_caught() {
        let mut board = Board::initial_position();
        board.material[0] += 100;
        board.check();
    }

    #[test]
    #[should_panic]
    fn corrupted_key_is_caught() {
        let mut board = Board::initial_position();
        board.key ^= 0xdead_beef;
        board.check();
    }

    #[test]
    fn mirror_round_trip() {
        let fens = [
            START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        ];

        for fen in fens.iter() {
            let original = Board::from_fen(fen).unwrap();
            let mut board = original.clone();

            board.mirror();
            assert!(board.check());
            assert_eq!(board.side, original.side.swap());

            board.mirror();
            assert_eq!(board.key, original.key);
            assert!(board.pieces[..] == original.pieces[..]);
            assert_eq!(board.castle_perm, original.castle_perm);
            assert_eq!(board.en_passant, original.en_passant);
        }
    }
}
