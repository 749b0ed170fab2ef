//! Game-state operations over [`Board`] values.
//!
//! Every function here is pure. Turn order is derived from the marks on the
//! board, so callers never track whose move it is separately.

use super::error::InvalidMoveError;
use super::position::Move;
use super::rules::{check_winner, find_winning_line, is_full};
use super::types::{Board, Outcome, Player, Square};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Utility of a terminal board: `1` if X won, `-1` if O won, `0` otherwise.
pub type Utility = i8;

/// Returns the empty starting board.
pub fn initial_state() -> Board {
    Board::new()
}

/// Returns the player to move.
///
/// O moves exactly when X has more marks than O; otherwise X moves.
pub fn current_player(board: &Board) -> Player {
    if board.count(Player::X) > board.count(Player::O) {
        Player::O
    } else {
        Player::X
    }
}

/// Returns every empty square. Empty exactly when the board is full.
pub fn legal_moves(board: &Board) -> BTreeSet<Move> {
    board.empty_cells().collect()
}

/// Returns a new board with the current player's mark at `mv`.
///
/// The input board is never modified.
///
/// # Errors
///
/// Returns [`InvalidMoveError::OutOfRange`] for coordinates off the board and
/// [`InvalidMoveError::Occupied`] if the square already holds a mark.
pub fn apply(board: &Board, mv: Move) -> Result<Board, InvalidMoveError> {
    if !mv.in_bounds() {
        return Err(InvalidMoveError::OutOfRange {
            row: mv.row,
            col: mv.col,
        });
    }
    if board.get(mv) != Square::Empty {
        return Err(InvalidMoveError::Occupied {
            row: mv.row,
            col: mv.col,
        });
    }

    let mut next = *board;
    next.set(mv, Square::Occupied(current_player(board)));
    Ok(next)
}

/// Returns the player holding a complete row, column or diagonal, if any.
pub fn winner(board: &Board) -> Option<Player> {
    check_winner(board)
}

/// Returns the winning line, for highlighting a finished game.
pub fn winning_line(board: &Board) -> Option<[Move; 3]> {
    find_winning_line(board).map(|(_, line)| line)
}

/// True once someone has won or the board is full.
pub fn is_terminal(board: &Board) -> bool {
    winner(board).is_some() || is_full(board)
}

/// Scores a board from X's point of view.
///
/// Only meaningful on terminal boards; non-terminal boards score `0`.
pub fn utility(board: &Board) -> Utility {
    match winner(board) {
        Some(Player::X) => 1,
        Some(Player::O) => -1,
        None => 0,
    }
}

/// Classifies the board as in progress, won, or drawn.
#[instrument(skip(board))]
pub fn outcome(board: &Board) -> Outcome {
    let outcome = match winner(board) {
        Some(player) => Outcome::Win(player),
        None if is_full(board) => Outcome::Draw,
        None => Outcome::InProgress,
    };
    debug!(?outcome, "Evaluated board");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_state() {
        let board = initial_state();
        assert_eq!(current_player(&board), Player::X);
        assert_eq!(legal_moves(&board).len(), 9);
        assert!(!is_terminal(&board));
        assert_eq!(outcome(&board), Outcome::InProgress);
    }

    #[test]
    fn test_apply_marks_current_player() {
        let board = apply(&initial_state(), Move::new(1, 1)).expect("legal");
        assert_eq!(board.get(Move::new(1, 1)), Square::Occupied(Player::X));
        assert_eq!(current_player(&board), Player::O);

        let board = apply(&board, Move::new(0, 0)).expect("legal");
        assert_eq!(board.get(Move::new(0, 0)), Square::Occupied(Player::O));
        assert_eq!(current_player(&board), Player::X);
    }

    #[test]
    fn test_apply_rejects_occupied_and_out_of_range() {
        let board = apply(&initial_state(), Move::new(0, 0)).expect("legal");
        assert_eq!(
            apply(&board, Move::new(0, 0)),
            Err(InvalidMoveError::Occupied { row: 0, col: 0 })
        );
        assert_eq!(
            apply(&board, Move::new(0, 3)),
            Err(InvalidMoveError::OutOfRange { row: 0, col: 3 })
        );
    }

    #[test]
    fn test_utility_signs() {
        let x_wins: Board = "XXX OO. ...".parse().expect("valid board");
        let o_wins: Board = "XX. OOO X..".parse().expect("valid board");
        assert_eq!(utility(&x_wins), 1);
        assert_eq!(utility(&o_wins), -1);
        assert_eq!(utility(&initial_state()), 0);
        assert_eq!(outcome(&o_wins), Outcome::Win(Player::O));
    }

    #[test]
    fn test_winning_line_reports_the_completed_squares() {
        let board: Board = "XO. XO. X..".parse().expect("valid board");
        assert_eq!(
            winning_line(&board),
            Some([Move::new(0, 0), Move::new(1, 0), Move::new(2, 0)])
        );
        assert_eq!(winning_line(&initial_state()), None);
    }
}
