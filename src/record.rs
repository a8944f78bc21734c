use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReversiError, Result};
use crate::state::{GameState, Transition};
use crate::types::{Action, Reward};

/// Append-only action log of one game.
///
/// JSON shape: `{"dim": 8, "actions": [[[2, 3], 0], [null, 0], ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub dim: usize,
    pub actions: Vec<(Action, Reward)>,
    /// CRC32 of the final board, written once the game has ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_board_crc: Option<u32>,
}

impl GameRecord {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            actions: Vec::new(),
            final_board_crc: None,
        }
    }

    pub fn push(&mut self, action: Action, reward: Reward) {
        self.actions.push((action, reward));
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Reward logged on the last ply, if any.
    pub fn last_reward(&self) -> Option<Reward> {
        self.actions.last().map(|&(_, reward)| reward)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Final position reached by a replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOutcome {
    pub final_state: GameState,
    pub reward: Reward,
    pub game_over: bool,
    pub plies: usize,
}

/// Rebuilds a recorded game by feeding its actions through [`GameState::act`]
/// from the standard opening.
#[derive(Debug, Clone)]
pub struct Replay {
    record: GameRecord,
    initial: GameState,
}

impl Replay {
    pub fn new(record: GameRecord) -> Result<Self> {
        let initial = GameState::new(record.dim)?;
        Ok(Self { record, initial })
    }

    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "reading game record");
        Self::new(GameRecord::load(path)?)
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn len(&self) -> usize {
        self.record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    pub fn initial_state(&self) -> &GameState {
        &self.initial
    }

    /// Action logged for `turn`.
    pub fn action(&self, turn: usize) -> Option<Action> {
        self.record.actions.get(turn).map(|&(action, _)| action)
    }

    /// State in which `turn` is to be played. `turn == len()` yields the
    /// state after the last logged ply.
    pub fn state_before_turn(&self, turn: usize) -> Result<GameState> {
        if turn > self.len() {
            return Err(ReversiError::ReplayMismatch {
                turn,
                reason: format!("record has only {} plies", self.len()),
            });
        }

        let mut state = self.initial.clone();
        for (idx, &(action, _)) in self.record.actions[..turn].iter().enumerate() {
            state = step(&state, action, idx)?.state;
        }
        Ok(state)
    }

    /// Every state of the game, starting with the opening.
    pub fn states(&self) -> Result<Vec<GameState>> {
        let mut states = Vec::with_capacity(self.len() + 1);
        states.push(self.initial.clone());
        for (idx, &(action, _)) in self.record.actions.iter().enumerate() {
            let next = step(&states[idx], action, idx)?.state;
            states.push(next);
        }
        Ok(states)
    }

    /// Replays the full log and checks it against the recomputed game:
    /// each logged reward, no plies after the terminal one, and the final
    /// board fingerprint when present.
    pub fn verify(&self) -> Result<ReplayOutcome> {
        let mut state = self.initial.clone();
        let mut reward = 0;
        let mut game_over = false;

        for (turn, &(action, logged)) in self.record.actions.iter().enumerate() {
            if game_over {
                return Err(ReversiError::ReplayMismatch {
                    turn,
                    reason: "action logged after the game ended".to_string(),
                });
            }

            let transition = step(&state, action, turn)?;
            if transition.reward != logged {
                return Err(ReversiError::ReplayMismatch {
                    turn,
                    reason: format!(
                        "logged reward {logged}, recomputed {}",
                        transition.reward
                    ),
                });
            }

            reward = transition.reward;
            game_over = transition.game_over;
            state = transition.state;
        }

        if let Some(expected) = self.record.final_board_crc {
            let actual = state.board().fingerprint();
            if actual != expected {
                return Err(ReversiError::ReplayMismatch {
                    turn: self.len(),
                    reason: format!(
                        "final board CRC32 mismatch: expected {expected:#010x}, got {actual:#010x}"
                    ),
                });
            }
        }

        Ok(ReplayOutcome {
            final_state: state,
            reward,
            game_over,
            plies: self.len(),
        })
    }
}

fn step(state: &GameState, action: Action, turn: usize) -> Result<Transition> {
    state.act(action).map_err(|err| ReversiError::ReplayMismatch {
        turn,
        reason: err.to_string(),
    })
}
