//! The canonical in-progress game held by a presentation layer.

use super::engine::{apply, current_player, initial_state, outcome};
use super::error::InvalidMoveError;
use super::position::Move;
use super::search::best_move;
use super::types::{Board, Outcome, Player};
use tracing::{info, instrument};

/// A single game session.
///
/// Holds exactly one current [`Board`] and replaces it wholesale on every
/// move, so hypothetical boards explored by the search never alias it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    board: Board,
    history: Vec<Move>,
}

impl Game {
    /// Creates a new game on the empty board.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: initial_state(),
            history: Vec::new(),
        }
    }

    /// Discards the current game and starts over.
    #[instrument(skip(self), fields(moves = self.history.len()))]
    pub fn restart(&mut self) {
        info!("Restarting game");
        *self = Self::new();
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the moves played so far, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the player to move.
    pub fn to_move(&self) -> Player {
        current_player(&self.board)
    }

    /// Returns the game's outcome so far.
    pub fn outcome(&self) -> Outcome {
        outcome(&self.board)
    }

    /// Plays a move for the player to move and returns the resulting outcome.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMoveError::GameOver`] once the game has ended, or the
    /// error from [`apply`] for an off-board or occupied square.
    #[instrument(skip(self), fields(player = %self.to_move()))]
    pub fn play(&mut self, mv: Move) -> Result<Outcome, InvalidMoveError> {
        if self.outcome().is_over() {
            return Err(InvalidMoveError::GameOver);
        }

        self.board = apply(&self.board, mv)?;
        self.history.push(mv);

        let outcome = self.outcome();
        info!(%outcome, "Move played");
        Ok(outcome)
    }

    /// Computes the optimal reply for the player to move without playing it.
    pub fn suggest(&self) -> Option<Move> {
        best_move(&self.board)
    }
}
