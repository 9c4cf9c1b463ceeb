use board::zobrist;
use board::{Board, BKCA, BQCA, WKCA, WQCA};
use types::*;

impl Board {
    /// Builds a board from a FEN string. The halfmove clock and the
    /// fullmove number are accepted but ignored.
    pub fn from_fen(fen: &str) -> Result<Board, &'static str> {
        let mut board = Board::new();
        let mut parts = fen.split_whitespace();

        // Piece placement, rank 8 first
        let placement = parts.next().ok_or("empty FEN string")?;
        let mut rank: i8 = 7;
        let mut file: i8 = 0;
        for c in placement.chars() {
            match c {
                '/' => {
                    rank -= 1;
                    file = 0;
                    if rank < 0 {
                        return Err("too many ranks in FEN piece placement");
                    }
                }
                '1'..='8' => {
                    file += c.to_digit(10).unwrap() as i8;
                }
                _ => {
                    let piece =
                        Piece::from_fen_char(c).ok_or("unknown piece in FEN piece placement")?;
                    if file > 7 {
                        return Err("too many files in FEN piece placement");
                    }
                    board.pieces[from_file_rank(file as u8, rank as u8) as usize] = piece;
                    file += 1;
                }
            }
            if file > 8 {
                return Err("too many files in FEN piece placement");
            }
        }

        board.side = match parts.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            _ => return Err("missing or invalid side to move"),
        };

        let castling = parts.next().ok_or("missing castling rights")?;
        if castling != "-" {
            for c in castling.chars() {
                board.castle_perm |= match c {
                    'K' => WKCA,
                    'Q' => WQCA,
                    'k' => BKCA,
                    'q' => BQCA,
                    _ => return Err("invalid castling rights"),
                };
            }
        }

        let en_passant = parts.next().ok_or("missing en passant square")?;
        if en_passant != "-" {
            let bytes = en_passant.as_bytes();
            if bytes.len() != 2
                || !(b'a'..=b'h').contains(&bytes[0])
                || !(b'1'..=b'8').contains(&bytes[1])
            {
                return Err("invalid en passant square");
            }
            board.en_passant = from_file_rank(bytes[0] - b'a', bytes[1] - b'1');
        }

        board.update_lists_material();

        if board.piece_count[WK as usize] != 1 || board.piece_count[BK as usize] != 1 {
            return Err("each side must have exactly one king");
        }

        board.key = zobrist::generate_position_key(&board);

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use board::{Board, BKCA, BQCA, WKCA, WQCA};
    use types::*;

    #[test]
    fn initial_position() {
        let board = Board::from_fen(START_FEN).unwrap();

        assert_eq!(board.side, Color::White);
        assert_eq!(board.castle_perm, WKCA | WQCA | BKCA | BQCA);
        assert_eq!(board.en_passant, NO_SQ);
        assert_eq!(board.pieces[E1 as usize], WK);
        assert_eq!(board.pieces[D8 as usize], BQ);
        assert_eq!(board.piece_count[WP as usize], 8);
        assert_eq!(board.piece_count[BP as usize], 8);
        assert_eq!(board.king_sq[Color::White as usize], E1);
        assert_eq!(board.king_sq[Color::Black as usize], E8);
        assert_eq!(board.material[0], board.material[1]);
        assert_eq!(board.big_pieces, [8, 8]);
        assert_eq!(board.major_pieces, [4, 4]);
        assert_eq!(board.minor_pieces, [4, 4]);
        assert!(board.check());
    }

    #[test]
    fn en_passant_square() {
        let board =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        assert_eq!(board.en_passant, from_file_rank(4, 2));
        assert!(board.check());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Board::from_fen("").is_err());
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8").is_err());
        assert!(Board::from_fen("xnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        assert!(
            Board::from_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err()
        );
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KXkq - 0 1").is_err());
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1").is_err());
        // No kings
        assert!(Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn key_matches_recompute() {
        use board::zobrist::generate_position_key;

        let fens = [
            START_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ];
        for fen in fens.iter() {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.key, generate_position_key(&board));
        }
    }
}
