//! Key mapping for keyboard navigation.

use crossterm::event::KeyCode;
use minimax_tictactoe::Move;

/// Moves cursor based on arrow keys, stopping at the board edges.
pub fn move_cursor(cursor: Move, key: KeyCode) -> Move {
    match key {
        KeyCode::Up => Move::new(cursor.row.saturating_sub(1), cursor.col),
        KeyCode::Down => Move::new((cursor.row + 1).min(2), cursor.col),
        KeyCode::Left => Move::new(cursor.row, cursor.col.saturating_sub(1)),
        KeyCode::Right => Move::new(cursor.row, (cursor.col + 1).min(2)),
        // No change for other keys
        _ => cursor,
    }
}

/// Maps keys 1-9 to squares, keypad style (1 is top-left).
pub fn key_to_move(key: KeyCode) -> Option<Move> {
    match key {
        KeyCode::Char(c) => c.to_digit(10).and_then(Move::from_keypad),
        _ => None,
    }
}
