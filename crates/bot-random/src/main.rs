//! Random move bot - plays a random legal move against a human.
//!
//! This is the simplest possible opponent, useful as a template for bots
//! that search. The board is printed to stdout after every move and the
//! human answers in UCI notation; logs go to stderr.

mod config;
mod selector;
mod session;

use anyhow::Context;
use clap::Parser;
use config::PlayConfig;
use selector::RandomSelector;
use session::Session;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Play chess against a bot that picks random legal moves.
#[derive(Parser)]
#[command(name = "bot-random")]
#[command(about = "Play chess against a bot that picks random legal moves")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value_os_t = PlayConfig::config_path())]
    config: PathBuf,

    /// Starting position in FEN, overriding the config file
    #[arg(long)]
    fen: Option<String>,

    /// Side the human plays: "w" or "b"
    #[arg(long)]
    side: Option<String>,

    /// Seed for reproducible bot moves
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn apply(self, config: &mut PlayConfig) {
        if let Some(fen) = self.fen {
            config.start_fen = fen;
        }
        if let Some(side) = self.side {
            config.player_side = side;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config_path = args.config.clone();
    let mut config = PlayConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    args.apply(&mut config);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let position = config.start_position()?;
    let player = config.player_color()?;
    tracing::info!(fen = %position.fen(), %player, seed = ?config.seed, "starting game");

    let selector = RandomSelector::new(config.seed);
    let stdin = io::stdin();
    let mut session = Session::new(position, player, selector, stdin.lock(), io::stdout());
    let outcome = session.run()?;

    tracing::info!(%outcome, fen = %session.position().fen(), "game over");
    Ok(())
}
