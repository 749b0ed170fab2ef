//! Tic-tac-toe against an opponent that always plays optimally.
//!
//! # Architecture
//!
//! - **Engine**: pure functions over [`Board`] values (turn order, legality,
//!   win/draw detection, utility)
//! - **Search**: exhaustive minimax picking the optimal [`Move`]
//! - **Game**: the single canonical board a presentation layer holds
//! - **Config**: presentation settings, passed to the TUI as a value
//!
//! # Example
//!
//! ```
//! use minimax_tictactoe::{Move, Player, apply, best_move, current_player, initial_state};
//!
//! let board = apply(&initial_state(), Move::new(1, 1))?;
//! assert_eq!(current_player(&board), Player::O);
//! assert!(best_move(&board).is_some());
//! # Ok::<(), minimax_tictactoe::InvalidMoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;

// Crate-level exports - Presentation config
pub use config::{ConfigError, TuiConfig};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, BoardParseError, Game, InvalidMoveError, LINES, Move, Outcome, Player, Square, Utility,
    apply, best_move, current_player, initial_state, is_terminal, legal_moves, max_value,
    min_value, outcome, utility, winner, winning_line,
};
