//! Unbeatable - command-line entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io;
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use unbeatable::{Console, PlayConfig, analyze, selfplay};
use unbeatable_tictactoe::{Board, Player};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            human,
            delay_ms,
            show_search,
        } => run_play(&config, human, delay_ms, show_search),
        Command::BestMove {
            board,
            to_move,
            json,
        } => run_best_move(&board, to_move, json),
        Command::Selfplay => run_selfplay(),
    }
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Run an interactive game on stdin/stdout
#[instrument(skip_all, fields(config_path = %config_path.display()))]
fn run_play(
    config_path: &Path,
    human: Option<Player>,
    delay_ms: Option<u64>,
    show_search: bool,
) -> Result<()> {
    let mut config = PlayConfig::load_or_default(config_path)
        .with_context(|| format!("Loading {}", config_path.display()))?;

    // Command-line flags win over the file
    if let Some(mark) = human {
        config = config.with_human_mark(mark);
    }
    if let Some(delay) = delay_ms {
        config = config.with_thinking_delay_ms(delay);
    }
    if show_search {
        config = config.with_show_search(true);
    }
    info!(?config, "Starting game");

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let tally = Console::new(stdin, stdout, config).run()?;
    info!(games = tally.games(), "Session ended");
    Ok(())
}

/// Print the engine's move for a given position
#[instrument(skip(board), fields(board = %board.compact()))]
fn run_best_move(board: &Board, to_move: Option<Player>, json: bool) -> Result<()> {
    let analysis = analyze(board, to_move)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{}\n\n{}", board, analysis);
    }
    Ok(())
}

/// Engine against itself
fn run_selfplay() -> Result<()> {
    let mut stdout = io::stdout().lock();
    selfplay(&mut stdout)?;
    Ok(())
}
