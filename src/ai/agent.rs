use std::collections::BTreeSet;

use rand::Rng;

use crate::error::Result;
use crate::state::GameState;
use crate::types::{Action, Position};

/// Decision-making capability for one or both sides of a game.
///
/// The driver calls [`Agent::choose_action`]; implementors supply
/// [`Agent::policy`] and may hook [`Agent::forced_pass`].
pub trait Agent {
    fn name(&self) -> &str;

    /// Picks an action. Only called when `legal` is non-empty; the returned
    /// action should be one of `legal` or an explicit pass.
    fn policy(
        &mut self,
        legal: &BTreeSet<Position>,
        state: &GameState,
        previous: &GameState,
    ) -> Result<Action>;

    /// Notification that the side to move has no placement.
    fn forced_pass(&mut self, _state: &GameState) {}

    fn choose_action(&mut self, state: &GameState, previous: &GameState) -> Result<Action> {
        let legal = state.legal_moves();
        if legal.is_empty() {
            self.forced_pass(state);
            return Ok(Action::Pass);
        }
        self.policy(&legal, state, previous)
    }
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn policy(
        &mut self,
        legal: &BTreeSet<Position>,
        state: &GameState,
        previous: &GameState,
    ) -> Result<Action> {
        (**self).policy(legal, state, previous)
    }

    fn forced_pass(&mut self, state: &GameState) {
        (**self).forced_pass(state)
    }

    fn choose_action(&mut self, state: &GameState, previous: &GameState) -> Result<Action> {
        (**self).choose_action(state, previous)
    }
}

/// Uniform pick; `None` for an empty slice.
pub(crate) fn choose_uniform<T: Copy, R: Rng>(rng: &mut R, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.random_range(0..items.len())])
}
