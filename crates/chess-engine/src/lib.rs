//! Chess rules engine with a mailbox board representation.
//!
//! This crate provides:
//! - [`Position`] - Full game state with in-place move application
//! - [`is_attacked`] - Attack detection for any square
//! - Pseudo-legal and legal move generation into a [`MoveList`]
//! - [`evaluate`] - Static evaluation in centipawns
//! - [`perft`](movegen::perft::perft) node counting
//!
//! # Architecture
//!
//! The board is an array of 64 piece codes indexed from a8 to h1. Attacks
//! are derived from the board on every query, without incremental state.
//! Legal moves are found by trying each pseudo-legal move on the board and
//! undoing it.
//!
//! # Example
//!
//! ```
//! use chess_engine::Position;
//!
//! let mut position = Position::startpos();
//! let moves = position.legal_moves().unwrap();
//! println!("Legal moves from starting position: {}", moves.len());
//!
//! let e4 = position.find_legal_move("e2e4").unwrap().unwrap();
//! position.apply_move(e4).unwrap();
//! println!("Position after 1.e4: {}", position.fen());
//! println!("Evaluation: {}", position.evaluate());
//! ```

mod error;
pub mod eval;
pub mod movegen;
mod position;

pub use error::EngineError;
pub use eval::{evaluate, evaluate_detailed, Evaluation};
pub use movegen::{
    generate_legal_moves, generate_pseudo_legal_moves, is_attacked, is_legal, MoveList,
};
pub use position::Position;
