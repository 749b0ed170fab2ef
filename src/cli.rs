//! Command-line interface for minimax_tictactoe.

use clap::{Parser, Subcommand};
use minimax_tictactoe::{Board, Player};

/// Tic-tac-toe against an optimal minimax opponent
#[derive(Parser, Debug)]
#[command(name = "minimax_tictactoe")]
#[command(about = "Play tic-tac-toe against an AI that never loses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal UI
    Play {
        /// Path to a TOML config file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Side the human plays: x moves first, o moves second
        #[arg(long)]
        human: Option<Player>,

        /// Milliseconds to show the final board before the end screen
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Print the optimal move for a board given as nine squares (X, O, or .)
    Solve {
        /// Board in row-major order, e.g. "XX. OO. ..."
        board: Board,
    },
}
