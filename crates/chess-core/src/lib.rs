//! Core types for chess.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Piece`], [`PieceCode`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for move representation
//! - [`CastlingRights`] and [`CastlingSide`]
//! - [`Setup`] with FEN parsing and serialization

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod setup;
mod square;

pub use castling::{CastlingRights, CastlingSide};
pub use color::Color;
pub use fen::{FenError, STARTPOS};
pub use mov::Move;
pub use piece::{Piece, PieceCode};
pub use setup::Setup;
pub use square::{File, Rank, Square};
