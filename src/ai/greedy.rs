use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use web_time::Instant;

use super::agent::{Agent, choose_uniform};
use super::heuristic::{Heuristic, ScoreHeuristic, SearchStrategy};
use crate::error::{ReversiError, Result};
use crate::state::GameState;
use crate::types::{Action, Position};

/// Picks the placement whose resulting state scores best for the side to
/// move. Ties are broken uniformly at random.
///
/// The heuristic and the search strategy are independent: the same agent
/// type covers greedy play ([`SearchStrategy::Direct`]) and minimax play
/// ([`SearchStrategy::AlphaBeta`]).
pub struct HeuristicAgent<H, R = ChaCha8Rng> {
    name: String,
    heuristic: H,
    strategy: SearchStrategy,
    rng: R,
}

impl<H: Heuristic> HeuristicAgent<H, ChaCha8Rng> {
    /// One-ply lookahead.
    pub fn greedy(heuristic: H, seed: u64) -> Self {
        Self::new(
            "Greedy",
            heuristic,
            SearchStrategy::Direct,
            ChaCha8Rng::seed_from_u64(seed),
        )
    }

    /// `depth` plies of lookahead counting the agent's own move; each
    /// candidate's resulting state is searched `depth - 1` plies deeper.
    pub fn minimax(heuristic: H, depth: u32, seed: u64) -> Self {
        Self::new(
            format!("Minimax({depth})"),
            heuristic,
            SearchStrategy::AlphaBeta {
                depth: depth.saturating_sub(1),
            },
            ChaCha8Rng::seed_from_u64(seed),
        )
    }
}

impl HeuristicAgent<ScoreHeuristic, ChaCha8Rng> {
    pub fn score_greedy(seed: u64) -> Self {
        Self::greedy(ScoreHeuristic, seed)
    }

    pub fn score_minimax(depth: u32, seed: u64) -> Self {
        Self::minimax(ScoreHeuristic, depth, seed)
    }
}

impl<H: Heuristic, R: Rng> HeuristicAgent<H, R> {
    pub fn new(name: impl Into<String>, heuristic: H, strategy: SearchStrategy, rng: R) -> Self {
        Self {
            name: name.into(),
            heuristic,
            strategy,
            rng,
        }
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Each legal placement with `value(child) * sign(side to move)`.
    pub fn scored_moves(
        &self,
        legal: &BTreeSet<Position>,
        state: &GameState,
    ) -> Result<Vec<(Position, f64)>> {
        let sign = f64::from(state.current_player().sign());
        legal
            .iter()
            .map(|&pos| -> Result<(Position, f64)> {
                let child = state.act(Action::Place(pos))?.state;
                let value = self.strategy.evaluate(&child, &self.heuristic)?;
                Ok((pos, value * sign))
            })
            .collect()
    }

    /// The subset of legal placements sharing the maximal score.
    pub fn best_moves(&self, legal: &BTreeSet<Position>, state: &GameState) -> Result<Vec<Position>> {
        let scored = self.scored_moves(legal, state)?;
        let best = scored
            .iter()
            .map(|&(_, score)| score)
            .fold(f64::NEG_INFINITY, f64::max);
        Ok(scored
            .into_iter()
            .filter(|&(_, score)| score == best)
            .map(|(pos, _)| pos)
            .collect())
    }
}

impl<H: Heuristic, R: Rng> Agent for HeuristicAgent<H, R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn policy(
        &mut self,
        legal: &BTreeSet<Position>,
        state: &GameState,
        _previous: &GameState,
    ) -> Result<Action> {
        let started = Instant::now();
        let best = self.best_moves(legal, state)?;
        let choice = choose_uniform(&mut self.rng, &best).ok_or_else(|| ReversiError::Agent {
            agent: self.name.clone(),
            reason: "no move produced a finite score".to_string(),
        })?;

        tracing::debug!(
            agent = %self.name,
            candidates = legal.len(),
            ties = best.len(),
            choice = %choice,
            elapsed_us = started.elapsed().as_micros() as u64,
            "heuristic agent decided"
        );

        Ok(Action::Place(choice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::search::minimax;
    use crate::board::Board;
    use crate::types::Player;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn greedy_takes_the_largest_capture() {
        let board = Board::from_rows(&[
            "......", //
            ".WWWB.", //
            "..W...", //
            "..B...", //
            "......", //
            "......", //
        ]);
        let state = GameState::from_parts(board, Player::Black, true);
        let mut agent = HeuristicAgent::score_greedy(1);

        let action = agent.choose_action(&state, &state).unwrap();

        assert_eq!(action, Action::Place(pos(1, 0)));
    }

    #[test]
    fn white_maximizes_its_own_side() {
        let board = Board::from_rows(&[
            "......", //
            ".BBBW.", //
            "..B...", //
            "..W...", //
            "......", //
            "......", //
        ]);
        let state = GameState::from_parts(board, Player::White, true);
        let mut agent = HeuristicAgent::score_greedy(1);

        let action = agent.choose_action(&state, &state).unwrap();

        assert_eq!(action, Action::Place(pos(1, 0)));
    }

    #[test]
    fn symmetric_opening_is_a_four_way_tie() {
        let state = GameState::new(8).unwrap();
        let agent = HeuristicAgent::score_greedy(0);

        let best = agent.best_moves(&state.legal_moves(), &state).unwrap();

        assert_eq!(best.len(), 4);
    }

    #[test]
    fn tie_break_is_reproducible_and_covers_all_ties() {
        let state = GameState::new(8).unwrap();
        let mut seen = BTreeSet::new();
        for seed in 0..64 {
            let mut a = HeuristicAgent::score_greedy(seed);
            let mut b = HeuristicAgent::score_greedy(seed);
            let left = a.choose_action(&state, &state).unwrap();
            let right = b.choose_action(&state, &state).unwrap();
            assert_eq!(left, right);
            seen.insert(left);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn depth_one_minimax_is_greedy() {
        let state = GameState::new(6).unwrap();
        let greedy = HeuristicAgent::score_greedy(5);
        let shallow = HeuristicAgent::score_minimax(1, 5);

        assert_eq!(shallow.strategy(), SearchStrategy::AlphaBeta { depth: 0 });
        assert_eq!(
            greedy.scored_moves(&state.legal_moves(), &state).unwrap(),
            shallow.scored_moves(&state.legal_moves(), &state).unwrap()
        );
    }

    #[test]
    fn minimax_scores_match_full_width_values() {
        let state = GameState::new(6).unwrap();
        let agent = HeuristicAgent::score_minimax(3, 0);
        let leaf = |s: &GameState| ScoreHeuristic.evaluate(s);

        for (pos, score) in agent.scored_moves(&state.legal_moves(), &state).unwrap() {
            let child = state.act(Action::Place(pos)).unwrap().state;
            assert_eq!(score, minimax(&child, 2, &leaf).unwrap());
        }
    }

    #[test]
    fn minimax_agent_name_includes_depth() {
        assert_eq!(HeuristicAgent::score_minimax(4, 0).name(), "Minimax(4)");
        assert_eq!(HeuristicAgent::score_greedy(0).name(), "Greedy");
    }
}
