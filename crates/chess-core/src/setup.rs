//! Raw position data.

use crate::{CastlingRights, Color, Piece, PieceCode, Square};

/// The six pieces of information a FEN record carries.
///
/// A `Setup` is not validated beyond the FEN grammar: it may lack kings or
/// hold rights that no longer match the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    /// Square contents, indexed by [`Square::index`] (a8 = 0, h1 = 63).
    pub board: [PieceCode; 64],
    /// The side to move.
    pub side_to_move: Color,
    /// Castling rights.
    pub castling: CastlingRights,
    /// Square a pawn would land on to capture en passant.
    pub en_passant: Option<Square>,
    /// Plies since the last pawn move or capture.
    pub halfmove_clock: u32,
    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Setup {
    /// Creates an empty board with White to move.
    pub const fn empty() -> Self {
        Setup {
            board: [PieceCode::EMPTY; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Returns the content of a square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> PieceCode {
        self.board[sq.index() as usize]
    }

    /// Overwrites the content of a square.
    #[inline]
    pub fn set(&mut self, sq: Square, code: PieceCode) {
        self.board[sq.index() as usize] = code;
    }

    /// Counts the occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.board.iter().filter(|code| !code.is_empty()).count()
    }

    /// Counts the pieces of one type and color.
    pub fn count(&self, piece: Piece, color: Color) -> usize {
        self.board
            .iter()
            .filter(|code| code.is(piece, color))
            .count()
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::empty()
    }
}
