//! Game rules for tic-tac-toe.
//!
//! Pure functions that evaluate a board according to tic-tac-toe rules.
//! Rules are kept apart from board storage so the engine and the search can
//! share them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, find_winning_line};
