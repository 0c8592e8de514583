//! Errors raised by the rules engine.

use chess_core::{Color, FenError, Move, Square};
use thiserror::Error;

/// Errors that can occur while building or mutating a [`Position`](crate::Position).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The FEN text violates the grammar.
    #[error("malformed FEN: {0}")]
    MalformedFen(#[from] FenError),

    /// A promotion was requested for a non-pawn, off the last rank, or to
    /// a piece the mover may not promote to.
    #[error("illegal promotion {mv}: {reason}")]
    IllegalPromotion { mv: Move, reason: &'static str },

    /// No king of this color is on the board; the position is corrupt.
    #[error("no {0} king on the board")]
    MissingKing(Color),

    /// A move was applied from an empty square.
    #[error("no piece on {0}")]
    EmptySquare(Square),
}
