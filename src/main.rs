//! Tic-tac-toe against a minimax AI - CLI entry point
//!
//! Runs the terminal game or solves a single position.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use minimax_tictactoe::{
    Board, Player, TuiConfig, best_move, current_player, is_terminal, max_value, min_value,
    outcome,
};
use std::path::PathBuf;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            human,
            delay_ms,
        } => run_play(config, human, delay_ms).await,
        Command::Solve { board } => run_solve(board),
    }
}

/// Run the terminal game with settings from file and flags
async fn run_play(
    config_path: Option<PathBuf>,
    human: Option<Player>,
    delay_ms: Option<u64>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => TuiConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => TuiConfig::default(),
    };
    if let Some(player) = human {
        config = config.with_human_player(player);
    }
    if let Some(delay_ms) = delay_ms {
        config = config.with_end_screen_delay_ms(delay_ms);
    }

    tui::run_tui(config).await
}

/// Print the side to move and the optimal reply for a board
#[instrument(skip(board))]
fn run_solve(board: Board) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let skew = board.count(Player::X) as isize - board.count(Player::O) as isize;
    if !(0..=1).contains(&skew) {
        warn!(skew, "Mark counts cannot arise in legal play");
        anyhow::bail!("Board is not reachable: X must have as many marks as O, or one more");
    }

    info!("Solving position");
    println!("{}\n", board.display());

    if is_terminal(&board) {
        println!("Game over: {}", outcome(&board));
        return Ok(());
    }

    let to_move = current_player(&board);
    let value = match to_move {
        Player::X => max_value(&board),
        Player::O => min_value(&board),
    };
    let verdict = match value {
        1 => "X wins with best play",
        -1 => "O wins with best play",
        _ => "draw with best play",
    };

    println!("To move: {}", to_move);
    if let Some(mv) = best_move(&board) {
        println!("Best move: {}", mv);
    }
    println!("Value: {} ({})", value, verdict);

    Ok(())
}
