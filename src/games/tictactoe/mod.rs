mod engine;
mod error;
mod game;
mod position;
mod rules;
mod search;
mod types;

pub use engine::{
    Utility, apply, current_player, initial_state, is_terminal, legal_moves, outcome, utility,
    winner, winning_line,
};
pub use error::InvalidMoveError;
pub use game::Game;
pub use position::Move;
pub use rules::LINES;
pub use search::{best_move, max_value, min_value};
pub use types::{Board, BoardParseError, Outcome, Player, Square};
