//! Errors raised when a move cannot be applied.

use super::position::Move;
use derive_more::{Display, Error};

/// A move that violates the caller's contract with the engine.
///
/// Presentation code is expected to filter moves through
/// [`legal_moves`](super::legal_moves) before submitting them, so this
/// error indicates a bug in the caller rather than a game condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvalidMoveError {
    /// The coordinates are outside the 3x3 board.
    #[display("Move ({row}, {col}) is off the board")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The square already holds a mark.
    #[display("Square ({row}, {col}) is already occupied")]
    Occupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,
}

impl InvalidMoveError {
    /// Returns the rejected move, if the error concerns a specific square.
    pub fn rejected_move(&self) -> Option<Move> {
        match *self {
            Self::OutOfRange { row, col } | Self::Occupied { row, col } => {
                Some(Move::new(row, col))
            }
            Self::GameOver => None,
        }
    }
}
