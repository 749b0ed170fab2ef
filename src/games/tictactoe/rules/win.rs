//! Win detection logic for tic-tac-toe.

use super::super::{Board, Move, Player, Square};

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const LINES: [[Move; 3]; 8] = [
    // Rows
    [Move::new(0, 0), Move::new(0, 1), Move::new(0, 2)],
    [Move::new(1, 0), Move::new(1, 1), Move::new(1, 2)],
    [Move::new(2, 0), Move::new(2, 1), Move::new(2, 2)],
    // Columns
    [Move::new(0, 0), Move::new(1, 0), Move::new(2, 0)],
    [Move::new(0, 1), Move::new(1, 1), Move::new(2, 1)],
    [Move::new(0, 2), Move::new(1, 2), Move::new(2, 2)],
    // Diagonals
    [Move::new(0, 0), Move::new(1, 1), Move::new(2, 2)],
    [Move::new(0, 2), Move::new(1, 1), Move::new(2, 0)],
];

/// Returns the first line fully held by one player, with its owner.
///
/// Lines are scanned rows, then columns, then diagonals. A malformed board
/// holding several complete lines reports the first one found.
pub fn find_winning_line(board: &Board) -> Option<(Player, [Move; 3])> {
    LINES.into_iter().find_map(|line| {
        let [a, b, c] = line.map(|mv| board.get(mv));
        match a {
            Square::Occupied(player) if a == b && b == c => Some((player, line)),
            _ => None,
        }
    })
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Player> {
    find_winning_line(board).map(|(player, _)| player)
}
