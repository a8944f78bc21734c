use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use reversi_agents::Reward;
use reversi_agents::config::MatchConfig;
use reversi_agents::game::Game;
use reversi_agents::record::{GameRecord, Replay};

/// Play headless Reversi matches between built-in agents.
#[derive(Parser)]
#[command(name = "reversi-match", about = "Play headless Reversi matches")]
struct Cli {
    /// Path to TOML match configuration
    #[arg(long, default_value = "match.toml")]
    config: PathBuf,

    /// Override number of games
    #[arg(long)]
    games: Option<usize>,

    /// Override base seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override where the last game's action log is written
    #[arg(long)]
    record: Option<PathBuf>,

    /// Replay and verify an existing action log instead of playing
    #[arg(long, value_name = "RECORD")]
    verify: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Tally {
    black: usize,
    white: usize,
    ties: usize,
}

impl Tally {
    fn add(&mut self, reward: Reward) {
        match reward {
            1 => self.black += 1,
            -1 => self.white += 1,
            _ => self.ties += 1,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Some(path) = cli.verify.as_deref() {
        return verify_record(path);
    }

    let mut config = MatchConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(games) = cli.games {
        config.games = games;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if cli.record.is_some() {
        config.record = cli.record;
    }
    config.validate()?;

    let mut tally = Tally::default();
    let mut last_record: Option<GameRecord> = None;
    for game_index in 0..config.games {
        let mut game = Game::new(config.dim, config.build_agent(game_index))?;
        let reward = game
            .play()
            .with_context(|| format!("playing game {game_index}"))?;
        tally.add(reward);
        last_record = Some(game.into_record());
    }

    tracing::info!(
        games = config.games,
        black = tally.black,
        white = tally.white,
        ties = tally.ties,
        "match finished"
    );
    println!(
        "black {} / white {} / ties {}",
        tally.black, tally.white, tally.ties
    );

    if let (Some(path), Some(record)) = (config.record.as_deref(), last_record.as_ref()) {
        record
            .save(path)
            .with_context(|| format!("writing record to {}", path.display()))?;
        tracing::info!(path = %path.display(), plies = record.len(), "record written");
    }

    Ok(())
}

fn verify_record(path: &Path) -> Result<()> {
    let replay = Replay::load(path).with_context(|| format!("reading {}", path.display()))?;
    let outcome = replay
        .verify()
        .with_context(|| format!("verifying {}", path.display()))?;
    let score = outcome.final_state.score();

    println!(
        "{}: {} plies, black {} / white {}, reward {}{}",
        path.display(),
        outcome.plies,
        score.black,
        score.white,
        outcome.reward,
        if outcome.game_over { "" } else { " (unfinished)" }
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}
