//! Chess piece representation.
//!
//! A square's content is a [`PieceCode`]: the piece type in the low three
//! bits and the color in two separate bits above them. Code 0 is an empty
//! square. Conversion to and from FEN letters goes through two fixed tables
//! built at compile time.

use crate::Color;
use std::fmt;

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl Piece {
    /// All piece types in order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Pieces a pawn may promote to, in generation order.
    pub const PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

    /// Decodes the type bits of a piece code.
    #[inline]
    pub const fn from_type_bits(bits: u8) -> Option<Piece> {
        match bits {
            1 => Some(Piece::Pawn),
            2 => Some(Piece::Knight),
            3 => Some(Piece::Bishop),
            4 => Some(Piece::Rook),
            5 => Some(Piece::Queen),
            6 => Some(Piece::King),
            _ => None,
        }
    }

    /// Returns the lowercase letter for this piece (black FEN letter).
    #[inline]
    pub const fn letter(self) -> u8 {
        match self {
            Piece::Pawn => b'p',
            Piece::Knight => b'n',
            Piece::Bishop => b'b',
            Piece::Rook => b'r',
            Piece::Queen => b'q',
            Piece::King => b'k',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        };
        write!(f, "{}", name)
    }
}

const TYPE_MASK: u8 = 0b00111;
const COLOR_MASK: u8 = 0b11000;

/// Code to FEN letter, 0 where the code is not a piece.
static CODE_TO_LETTER: [u8; 32] = build_code_to_letter();

/// ASCII FEN letter to code, 0 where the byte is not a piece letter.
static LETTER_TO_CODE: [u8; 128] = build_letter_to_code();

const fn build_code_to_letter() -> [u8; 32] {
    let mut table = [0u8; 32];
    let mut i = 0;
    while i < Piece::ALL.len() {
        let piece = Piece::ALL[i];
        let lower = piece.letter();
        table[(Color::White.code_bits() | piece as u8) as usize] = lower.to_ascii_uppercase();
        table[(Color::Black.code_bits() | piece as u8) as usize] = lower;
        i += 1;
    }
    table
}

const fn build_letter_to_code() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < Piece::ALL.len() {
        let piece = Piece::ALL[i];
        let lower = piece.letter();
        table[lower.to_ascii_uppercase() as usize] = Color::White.code_bits() | piece as u8;
        table[lower as usize] = Color::Black.code_bits() | piece as u8;
        i += 1;
    }
    table
}

/// The content of one board square: a colored piece, or empty.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PieceCode(u8);

impl PieceCode {
    /// An empty square.
    pub const EMPTY: PieceCode = PieceCode(0);

    /// Creates the code for a piece of the given color.
    #[inline]
    pub const fn new(piece: Piece, color: Color) -> Self {
        PieceCode(piece as u8 | color.code_bits())
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the piece type, or `None` for an empty square.
    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        Piece::from_type_bits(self.0 & TYPE_MASK)
    }

    /// Returns the piece color, or `None` for an empty square.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        match self.0 & COLOR_MASK {
            0b01000 => Some(Color::White),
            0b10000 => Some(Color::Black),
            _ => None,
        }
    }

    /// Returns true if the square holds a piece of the given color.
    #[inline]
    pub const fn is_color(self, color: Color) -> bool {
        self.0 & COLOR_MASK == color.code_bits()
    }

    /// Returns true if the square holds exactly this piece and color.
    #[inline]
    pub const fn is(self, piece: Piece, color: Color) -> bool {
        self.0 == piece as u8 | color.code_bits()
    }

    /// Returns the FEN letter, or `None` for an empty square.
    pub fn to_fen_char(self) -> Option<char> {
        match CODE_TO_LETTER[(self.0 & (COLOR_MASK | TYPE_MASK)) as usize] {
            0 => None,
            letter => Some(letter as char),
        }
    }

    /// Parses a FEN piece letter.
    pub fn from_fen_char(c: char) -> Option<Self> {
        if !c.is_ascii() {
            return None;
        }
        match LETTER_TO_CODE[c as usize] {
            0 => None,
            code => Some(PieceCode(code)),
        }
    }
}

impl fmt::Debug for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PieceCode({})", self)
    }
}

impl fmt::Display for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_char().unwrap_or('.'))
    }
}
