use web_time::Instant;

use crate::ai::Agent;
use crate::error::{ReversiError, Result};
use crate::record::GameRecord;
use crate::session::{Ply, Session};
use crate::state::GameState;
use crate::types::Reward;

/// Driver phase. `Terminal` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Terminal { reward: Reward },
}

/// Turn loop that asks one agent for every ply and logs the result.
///
/// Use a [`crate::ai::DualAgent`] to seat different agents on each side.
pub struct Game<A> {
    session: Session,
    agent: A,
}

impl<A: Agent> Game<A> {
    pub fn new(dim: usize, agent: A) -> Result<Self> {
        Ok(Self {
            session: Session::new(dim)?,
            agent,
        })
    }

    pub fn phase(&self) -> Phase {
        match self.session.outcome() {
            Some(reward) => Phase::Terminal { reward },
            None => Phase::Running,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &GameState {
        self.session.state()
    }

    pub fn record(&self) -> &GameRecord {
        self.session.record()
    }

    pub fn into_record(self) -> GameRecord {
        self.session.into_record()
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Plays one ply. Fails with [`ReversiError::GameOver`] in the terminal
    /// phase; an agent error or an illegal agent action leaves the game
    /// unchanged.
    pub fn step(&mut self) -> Result<Ply> {
        if self.session.is_over() {
            return Err(ReversiError::GameOver);
        }

        let action = self
            .agent
            .choose_action(self.session.state(), self.session.previous())?;
        let ply = self.session.apply(action)?;

        tracing::debug!(
            turn = ply.turn,
            player = %ply.player,
            action = %ply.action,
            reward = ply.reward,
            "ply applied"
        );

        Ok(ply)
    }

    /// Runs until the game ends and returns the terminal reward.
    pub fn play(&mut self) -> Result<Reward> {
        let started = Instant::now();
        loop {
            let ply = self.step()?;
            if ply.game_over {
                let score = self.state().score();
                tracing::info!(
                    agent = %self.agent.name(),
                    reward = ply.reward,
                    black = score.black,
                    white = score.white,
                    plies = ply.turn + 1,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "game over"
                );
                return Ok(ply.reward);
            }
        }
    }
}
