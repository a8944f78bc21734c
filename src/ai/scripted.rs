use std::collections::{BTreeSet, VecDeque};

use super::agent::Agent;
use crate::error::{ReversiError, Result};
use crate::record::GameRecord;
use crate::state::GameState;
use crate::types::{Action, Position};

/// Plays a fixed sequence of actions, one per decision.
///
/// Forced passes consume a queued `Pass` so that a whole logged game can be
/// fed back through the driver. Running dry or reaching an illegal
/// placement is reported as an agent error, and the illegal placement is
/// not consumed.
pub struct ScriptedAgent {
    name: String,
    actions: VecDeque<Action>,
}

impl ScriptedAgent {
    pub fn new(name: impl Into<String>, actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            name: name.into(),
            actions: actions.into_iter().collect(),
        }
    }

    /// Every action of a recorded game, both sides interleaved.
    pub fn from_record(record: &GameRecord) -> Self {
        Self::new("Scripted", record.actions.iter().map(|&(action, _)| action))
    }

    pub fn remaining(&self) -> usize {
        self.actions.len()
    }

    fn failure(&self, reason: String) -> ReversiError {
        ReversiError::Agent {
            agent: self.name.clone(),
            reason,
        }
    }
}

impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn policy(
        &mut self,
        legal: &BTreeSet<Position>,
        _state: &GameState,
        _previous: &GameState,
    ) -> Result<Action> {
        let action = self
            .actions
            .front()
            .copied()
            .ok_or_else(|| self.failure("script exhausted".to_string()))?;

        // A rejected action stays queued.
        if let Action::Place(pos) = action
            && !legal.contains(&pos)
        {
            return Err(self.failure(format!("scripted move {pos} is not legal")));
        }
        self.actions.pop_front();
        Ok(action)
    }

    fn forced_pass(&mut self, _state: &GameState) {
        if self.actions.front() == Some(&Action::Pass) {
            self.actions.pop_front();
        } else {
            tracing::warn!(
                agent = %self.name,
                "forced pass does not match the next scripted action"
            );
        }
    }
}
