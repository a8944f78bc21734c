use std::collections::BTreeSet;

use super::agent::Agent;
use crate::error::Result;
use crate::state::GameState;
use crate::types::{Action, Player, Position};

/// Routes each decision to the sub-agent playing the side to move.
pub struct DualAgent {
    name: String,
    black: Box<dyn Agent>,
    white: Box<dyn Agent>,
}

impl DualAgent {
    pub fn new(black: Box<dyn Agent>, white: Box<dyn Agent>) -> Self {
        Self {
            name: format!("{} vs {}", black.name(), white.name()),
            black,
            white,
        }
    }

    pub fn agent_for(&mut self, player: Player) -> &mut dyn Agent {
        match player {
            Player::Black => self.black.as_mut(),
            Player::White => self.white.as_mut(),
        }
    }
}

impl Agent for DualAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn policy(
        &mut self,
        legal: &BTreeSet<Position>,
        state: &GameState,
        previous: &GameState,
    ) -> Result<Action> {
        self.agent_for(state.current_player()).policy(legal, state, previous)
    }

    fn forced_pass(&mut self, state: &GameState) {
        self.agent_for(state.current_player()).forced_pass(state);
    }
}
