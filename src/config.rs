use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ai::{Agent, DualAgent, HeuristicAgent, RandomAgent};
use crate::board::{MAX_DIM, MIN_DIM};
use crate::error::ConfigError;

/// Which built-in agent plays a side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentSpec {
    Random,
    Greedy,
    Minimax { depth: u32 },
}

impl AgentSpec {
    pub fn build(&self, seed: u64) -> Box<dyn Agent> {
        match *self {
            AgentSpec::Random => Box::new(RandomAgent::seeded(seed)),
            AgentSpec::Greedy => Box::new(HeuristicAgent::score_greedy(seed)),
            AgentSpec::Minimax { depth } => Box::new(HeuristicAgent::score_minimax(depth, seed)),
        }
    }
}

/// Headless match configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub dim: usize,
    pub games: usize,
    pub seed: u64,
    /// Where to write the last game's action log.
    pub record: Option<PathBuf>,
    pub black: AgentSpec,
    pub white: AgentSpec,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            dim: 8,
            games: 1,
            seed: 0,
            record: None,
            black: AgentSpec::Minimax { depth: 3 },
            white: AgentSpec::Random,
        }
    }
}

impl MatchConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DIM..=MAX_DIM).contains(&self.dim) || self.dim % 2 != 0 {
            return Err(ConfigError::Validation(format!(
                "dim must be even and in {MIN_DIM}..={MAX_DIM}, got {}",
                self.dim
            )));
        }
        if self.games == 0 {
            return Err(ConfigError::Validation("games must be > 0".into()));
        }
        for (side, spec) in [("black", &self.black), ("white", &self.white)] {
            if let AgentSpec::Minimax { depth: 0 } = spec {
                return Err(ConfigError::Validation(format!(
                    "{side}.depth must be > 0"
                )));
            }
        }
        Ok(())
    }

    /// Seats both sides for game number `game_index`. Seeds are derived from
    /// `seed` so every game of a match is reproducible on its own.
    pub fn build_agent(&self, game_index: usize) -> DualAgent {
        let base = self.seed.wrapping_add(2 * game_index as u64);
        DualAgent::new(self.black.build(base), self.white.build(base.wrapping_add(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = MatchConfig::from_toml_str(
            r#"
            dim = 6
            games = 10
            seed = 42
            record = "last.json"

            [black]
            kind = "minimax"
            depth = 2

            [white]
            kind = "greedy"
            "#,
        )
        .unwrap();

        assert_eq!(config.dim, 6);
        assert_eq!(config.games, 10);
        assert_eq!(config.seed, 42);
        assert_eq!(config.record, Some(PathBuf::from("last.json")));
        assert_eq!(config.black, AgentSpec::Minimax { depth: 2 });
        assert_eq!(config.white, AgentSpec::Greedy);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = MatchConfig::from_toml_str("games = 3").unwrap();
        assert_eq!(config.dim, 8);
        assert_eq!(config.games, 3);
        assert_eq!(config.black, AgentSpec::Minimax { depth: 3 });
        assert_eq!(config.white, AgentSpec::Random);
    }

    #[test]
    fn rejects_bad_values() {
        for (toml, needle) in [
            ("dim = 7", "dim must be even"),
            ("dim = 2", "dim must be even"),
            ("dim = 28", "dim must be even"),
            ("games = 0", "games must be > 0"),
            ("[white]\nkind = \"minimax\"\ndepth = 0", "white.depth must be > 0"),
        ] {
            let err = MatchConfig::from_toml_str(toml).unwrap_err();
            assert!(err.to_string().contains(needle), "{toml}: {err}");
        }
    }

    #[test]
    fn unknown_agent_kind_is_a_parse_error() {
        let err = MatchConfig::from_toml_str("[black]\nkind = \"oracle\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn build_agent_names_both_sides() {
        let config = MatchConfig::default();
        assert_eq!(config.build_agent(0).name(), "Minimax(3) vs Random");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config =
            MatchConfig::load_or_default(Path::new("/nonexistent/reversi/match.toml")).unwrap();
        assert_eq!(config, MatchConfig::default());
    }
}
