use crate::ai::search::alphabeta;
use crate::error::Result;
use crate::state::GameState;

/// Scores a state from Black's perspective: higher is better for Black.
pub trait Heuristic {
    fn evaluate(&self, state: &GameState) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&GameState) -> f64,
{
    fn evaluate(&self, state: &GameState) -> f64 {
        self(state)
    }
}

/// Normalized piece difference: `(black - white) / (black + white)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreHeuristic;

impl Heuristic for ScoreHeuristic {
    fn evaluate(&self, state: &GameState) -> f64 {
        let score = state.score();
        let total = score.black + score.white;
        if total == 0 {
            return 0.0;
        }
        (score.black as f64 - score.white as f64) / total as f64
    }
}

/// How a candidate state is valued from a leaf heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Apply the heuristic to the state itself.
    Direct,
    /// Alpha-beta search below the state, heuristic at the leaves.
    AlphaBeta { depth: u32 },
}

impl SearchStrategy {
    pub fn evaluate<H>(&self, state: &GameState, leaf: &H) -> Result<f64>
    where
        H: Heuristic + ?Sized,
    {
        match *self {
            SearchStrategy::Direct => Ok(leaf.evaluate(state)),
            SearchStrategy::AlphaBeta { depth } => alphabeta(
                state,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                &|s: &GameState| leaf.evaluate(s),
            ),
        }
    }
}
