//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use super::generate_legal_moves;
use crate::{EngineError, Position};

/// Counts the number of leaf nodes at the given depth.
///
/// Each child is built from a clone of `position`, which is never modified.
pub fn perft(position: &Position, depth: u32) -> Result<u64, EngineError> {
    if depth == 0 {
        return Ok(1);
    }

    let mut scratch = position.clone();
    let moves = generate_legal_moves(&mut scratch)?;

    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for m in &moves {
        let mut child = position.clone();
        child.apply_move(*m)?;
        nodes += perft(&child, depth - 1)?;
    }
    Ok(nodes)
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(position: &Position, depth: u32) -> Result<Vec<(String, u64)>, EngineError> {
    let mut scratch = position.clone();
    let moves = generate_legal_moves(&mut scratch)?;
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let mut child = position.clone();
        child.apply_move(*m)?;
        let nodes = if depth > 1 {
            perft(&child, depth - 1)?
        } else {
            1
        };
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}
