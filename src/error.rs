use std::path::PathBuf;

use crate::types::{Player, Position};

/// Errors raised by the rules engine, agents, and the action log.
#[derive(Debug, thiserror::Error)]
pub enum ReversiError {
    #[error("board dimension must be even and between 4 and 26, got {0}")]
    InvalidDimension(usize),

    #[error("illegal move {position} for {player}")]
    IllegalMove { position: Position, player: Player },

    #[error("position {position} is outside a {dim}x{dim} board")]
    OutOfBounds { position: Position, dim: usize },

    #[error("game is already over")]
    GameOver,

    #[error("agent '{agent}' could not produce an action: {reason}")]
    Agent { agent: String, reason: String },

    #[error("replay diverged at turn {turn}: {reason}")]
    ReplayMismatch { turn: usize, reason: String },

    #[error("invalid notation '{0}'")]
    InvalidNotation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading match configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ReversiError>;
