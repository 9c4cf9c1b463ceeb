//! The piece representation

use types::color::Color;

// The piece type is represented as an enum but we need to be able to
// compute the enum back from bits (captured and promoted pieces are
// packed as 4-bit fields inside a move).
enum_from_primitive! {
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Piece {
    Empty = 0,

    WhitePawn,
    WhiteKnight,
    WhiteBishop,
    WhiteRook,
    WhiteQueen,
    WhiteKing,

    BlackPawn,
    BlackKnight,
    BlackBishop,
    BlackRook,
    BlackQueen,
    BlackKing,

    /// Border sentinel of the mailbox board
    OffBoard,
}
}

// Constant helpers to avoid repeating the Piece:: prefix
pub const WP: Piece = Piece::WhitePawn;
pub const WN: Piece = Piece::WhiteKnight;
pub const WB: Piece = Piece::WhiteBishop;
pub const WR: Piece = Piece::WhiteRook;
pub const WQ: Piece = Piece::WhiteQueen;
pub const WK: Piece = Piece::WhiteKing;
pub const BP: Piece = Piece::BlackPawn;
pub const BN: Piece = Piece::BlackKnight;
pub const BB: Piece = Piece::BlackBishop;
pub const BR: Piece = Piece::BlackRook;
pub const BQ: Piece = Piece::BlackQueen;
pub const BK: Piece = Piece::BlackKing;

/// Material value of each piece in centipawns
pub const PIECE_VAL: [i32; 13] = [
    0, 100, 325, 325, 550, 1000, 50_000, 100, 325, 325, 550, 1000, 50_000,
];

const PIECE_COL: [Color; 13] = [
    Color::Both,
    Color::White,
    Color::White,
    Color::White,
    Color::White,
    Color::White,
    Color::White,
    Color::Black,
    Color::Black,
    Color::Black,
    Color::Black,
    Color::Black,
    Color::Black,
];

/// The twelve real pieces, white first
pub const PIECES_LIST: [Piece; 12] = [WP, WN, WB, WR, WQ, WK, BP, BN, BB, BR, BQ, BK];

impl Piece {
    pub fn value(self) -> i32 {
        PIECE_VAL[self as usize]
    }

    pub fn color(self) -> Color {
        PIECE_COL[self as usize]
    }

    /// Anything but a pawn
    pub fn is_big(self) -> bool {
        match self {
            Piece::Empty | Piece::OffBoard | WP | BP => false,
            _ => true,
        }
    }

    /// Rook, queen or king
    pub fn is_major(self) -> bool {
        match self {
            WR | WQ | WK | BR | BQ | BK => true,
            _ => false,
        }
    }

    /// Knight or bishop
    pub fn is_minor(self) -> bool {
        match self {
            WN | WB | BN | BB => true,
            _ => false,
        }
    }

    pub fn is_pawn(self) -> bool {
        self == WP || self == BP
    }

    pub fn is_knight(self) -> bool {
        self == WN || self == BN
    }

    pub fn is_king(self) -> bool {
        self == WK || self == BK
    }

    /// Slides along ranks or files
    pub fn is_rook_or_queen(self) -> bool {
        match self {
            WR | WQ | BR | BQ => true,
            _ => false,
        }
    }

    /// Slides along diagonals
    pub fn is_bishop_or_queen(self) -> bool {
        match self {
            WB | WQ | BB | BQ => true,
            _ => false,
        }
    }

    /// Returns the character associated to the piece, '.' when empty
    pub fn to_char(self) -> char {
        match self {
            Piece::Empty => '.',
            WP => 'P',
            WN => 'N',
            WB => 'B',
            WR => 'R',
            WQ => 'Q',
            WK => 'K',
            BP => 'p',
            BN => 'n',
            BB => 'b',
            BR => 'r',
            BQ => 'q',
            BK => 'k',
            Piece::OffBoard => 'x',
        }
    }

    /// Decodes a FEN piece letter
    pub fn from_fen_char(c: char) -> Option<Piece> {
        match c {
            'P' => Some(WP),
            'N' => Some(WN),
            'B' => Some(WB),
            'R' => Some(WR),
            'Q' => Some(WQ),
            'K' => Some(WK),
            'p' => Some(BP),
            'n' => Some(BN),
            'b' => Some(BB),
            'r' => Some(BR),
            'q' => Some(BQ),
            'k' => Some(BK),
            _ => None,
        }
    }
}
