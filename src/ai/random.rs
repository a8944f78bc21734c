use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::agent::{Agent, choose_uniform};
use crate::error::{ReversiError, Result};
use crate::state::GameState;
use crate::types::{Action, Position};

/// An agent that selects uniformly at random from legal placements.
pub struct RandomAgent<R = ChaCha8Rng> {
    rng: R,
}

impl RandomAgent<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn name(&self) -> &str {
        "Random"
    }

    fn policy(
        &mut self,
        legal: &BTreeSet<Position>,
        _state: &GameState,
        _previous: &GameState,
    ) -> Result<Action> {
        let moves: Vec<Position> = legal.iter().copied().collect();
        choose_uniform(&mut self.rng, &moves)
            .map(Action::Place)
            .ok_or_else(|| ReversiError::Agent {
                agent: self.name().to_string(),
                reason: "no legal moves to choose from".to_string(),
            })
    }
}
