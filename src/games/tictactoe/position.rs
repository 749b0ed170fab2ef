//! Board coordinates for tic-tac-toe moves.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: the `(row, col)` square the player to move will mark.
///
/// Coordinates are not validated on construction. The engine rejects
/// anything outside `0..3` when the move is applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Move {
    /// Row, top to bottom.
    pub row: usize,
    /// Column, left to right.
    pub col: usize,
}

impl Move {
    /// All 9 squares in row-major order.
    pub const ALL: [Move; 9] = [
        Move::new(0, 0),
        Move::new(0, 1),
        Move::new(0, 2),
        Move::new(1, 0),
        Move::new(1, 1),
        Move::new(1, 2),
        Move::new(2, 0),
        Move::new(2, 1),
        Move::new(2, 2),
    ];

    /// Creates a move at the given coordinates.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns true if both coordinates lie on the 3x3 board.
    pub fn in_bounds(self) -> bool {
        self.row < 3 && self.col < 3
    }

    /// Converts to a row-major board index (0-8), or `None` off the board.
    pub fn index(self) -> Option<usize> {
        self.in_bounds().then(|| self.row * 3 + self.col)
    }

    /// Creates a move from a row-major board index.
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates a move from a keypad digit, 1 (top-left) through 9 (bottom-right).
    #[instrument]
    pub fn from_keypad(digit: u32) -> Option<Self> {
        match digit {
            1..=9 => Self::from_index(digit as usize - 1),
            _ => None,
        }
    }

    /// Get label for this square (for display).
    pub fn label(self) -> &'static str {
        match (self.row, self.col) {
            (0, 0) => "Top-left",
            (0, 1) => "Top-center",
            (0, 2) => "Top-right",
            (1, 0) => "Middle-left",
            (1, 1) => "Center",
            (1, 2) => "Middle-right",
            (2, 0) => "Bottom-left",
            (2, 1) => "Bottom-center",
            (2, 2) => "Bottom-right",
            _ => "Off-board",
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.label(), self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypad_maps_row_major() {
        assert_eq!(Move::from_keypad(1), Some(Move::new(0, 0)));
        assert_eq!(Move::from_keypad(5), Some(Move::new(1, 1)));
        assert_eq!(Move::from_keypad(9), Some(Move::new(2, 2)));
        assert_eq!(Move::from_keypad(0), None);
        assert_eq!(Move::from_keypad(10), None);
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, mv) in Move::ALL.iter().enumerate() {
            assert_eq!(mv.index(), Some(i));
            assert_eq!(Move::from_index(i), Some(*mv));
        }
    }

    #[test]
    fn test_bounds() {
        assert!(Move::new(2, 2).in_bounds());
        assert!(!Move::new(0, 3).in_bounds());
        assert_eq!(Move::new(5, 5).label(), "Off-board");
    }

    #[test]
    fn test_off_board_move_has_no_index() {
        assert_eq!(Move::new(0, 3).index(), None);
        assert_eq!(Move::new(usize::MAX, usize::MAX).index(), None);
    }
}
