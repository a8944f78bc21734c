//! Deterministic Reversi rules engine with alpha-beta search agents.
//!
//! - [`board`] / [`state`]: immutable positions and the `act` transition
//! - [`ai`]: the agent capability, alpha-beta search, heuristics
//! - [`game`] / [`session`]: agent-driven and externally driven turn loops
//! - [`record`]: JSON action log and replay verification

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod notation;
pub mod record;
pub mod session;
pub mod state;
pub mod types;
pub mod wasm;

pub use error::{ConfigError, Result, ReversiError};
pub use state::{GameState, Transition};
pub use types::{Action, Cell, Player, Position, Reward};
