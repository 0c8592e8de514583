//! Move selection.

use chess_core::Move;
use chess_engine::{EngineError, Position};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

/// Picks the bot's reply in a position.
///
/// Implementations receive the live position so they can enumerate legal
/// moves, which restores the board before returning.
pub trait MoveSelector {
    /// Returns the chosen move, or `None` when there are no legal moves.
    fn select(&mut self, position: &mut Position) -> Result<Option<Move>, EngineError>;
}

/// Chooses uniformly among the legal moves.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Creates a selector; a seed makes its choices reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        RandomSelector { rng }
    }
}

impl MoveSelector for RandomSelector {
    fn select(&mut self, position: &mut Position) -> Result<Option<Move>, EngineError> {
        let moves = position.legal_moves()?;
        Ok(moves.as_slice().choose(&mut self.rng).copied())
    }
}
