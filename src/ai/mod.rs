//! Move selection: the agent capability, its variants, and the search they use.

pub mod agent;
pub mod dual;
pub mod greedy;
pub mod heuristic;
pub mod random;
pub mod scripted;
pub mod search;

pub use agent::Agent;
pub use dual::DualAgent;
pub use greedy::HeuristicAgent;
pub use heuristic::{Heuristic, ScoreHeuristic, SearchStrategy};
pub use random::RandomAgent;
pub use scripted::ScriptedAgent;
pub use search::{SearchState, alphabeta, minimax};
