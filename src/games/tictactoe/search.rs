//! Exhaustive minimax search for the optimal move.
//!
//! X maximizes [`utility`], O minimizes it. The whole game tree below the
//! given board is explored without pruning or caching; from the empty board
//! that is fewer than 9! leaves.

use super::engine::{Utility, apply, current_player, is_terminal, utility};
use super::position::Move;
use super::types::{Board, Player};
use tracing::{debug, instrument};

/// Yields each legal move with the board it produces, in row-major order.
fn successors(board: &Board) -> impl Iterator<Item = (Move, Board)> + '_ {
    board
        .empty_cells()
        .filter_map(move |mv| apply(board, mv).ok().map(|next| (mv, next)))
}

/// Value of `board` with X to move and both sides playing optimally.
pub fn max_value(board: &Board) -> Utility {
    if is_terminal(board) {
        return utility(board);
    }
    successors(board)
        .map(|(_, next)| min_value(&next))
        .fold(Utility::MIN, Utility::max)
}

/// Value of `board` with O to move and both sides playing optimally.
pub fn min_value(board: &Board) -> Utility {
    if is_terminal(board) {
        return utility(board);
    }
    successors(board)
        .map(|(_, next)| max_value(&next))
        .fold(Utility::MAX, Utility::min)
}

/// Returns the optimal move for the player to move, or `None` on a
/// terminal board.
///
/// Ties go to the first optimal move in row-major order.
#[instrument(skip(board), fields(to_move = %current_player(board)))]
pub fn best_move(board: &Board) -> Option<Move> {
    if is_terminal(board) {
        debug!("Board is terminal, no move to search");
        return None;
    }

    let player = current_player(board);
    let mut best: Option<(Move, Utility)> = None;

    for (mv, next) in successors(board) {
        let value = match player {
            Player::X => min_value(&next),
            Player::O => max_value(&next),
        };
        let improves = match best {
            None => true,
            Some((_, best_value)) => match player {
                Player::X => value > best_value,
                Player::O => value < best_value,
            },
        };
        if improves {
            best = Some((mv, value));
        }
    }

    if let Some((mv, value)) = best {
        debug!(%mv, value, "Search complete");
    }
    best.map(|(mv, _)| mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().expect("valid board")
    }

    #[test]
    fn test_terminal_board_has_no_move() {
        assert_eq!(best_move(&board("XXX OO. ...")), None);
        assert_eq!(best_move(&board("XOX OXX OXO")), None);
    }

    #[test]
    fn test_completes_own_row() {
        assert_eq!(best_move(&board("XX. OO. ...")), Some(Move::new(0, 2)));
    }

    #[test]
    fn test_o_takes_win_over_block() {
        // O can win on the middle row instead of blocking X's top row.
        assert_eq!(best_move(&board("XX. OO. X..")), Some(Move::new(1, 2)));
    }

    #[test]
    fn test_o_blocks_immediate_threat() {
        assert_eq!(best_move(&board("XX. .O. ...")), Some(Move::new(0, 2)));
    }

    #[test]
    fn test_values_of_decided_positions() {
        // X to move with a winning square available.
        assert_eq!(max_value(&board("XX. OO. ...")), 1);
        // O to move and able to win at once.
        assert_eq!(min_value(&board("XX. OO. X..")), -1);
    }
}
