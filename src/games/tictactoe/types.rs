//! Core domain types for tic-tac-toe.

use super::position::Move;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X (goes first, maximizes utility).
    X,
    /// Player O (goes second, minimizes utility).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// 3x3 tic-tac-toe board.
///
/// Boards are plain values: every transition produces a new board and the
/// previous one is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares indexed as `squares[row][col]`.
    squares: [[Square; 3]; 3],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at the given move's coordinates.
    ///
    /// Out-of-range coordinates read as [`Square::Empty`]; callers that care
    /// should check [`Move::in_bounds`] first.
    pub fn get(&self, mv: Move) -> Square {
        self.squares
            .get(mv.row)
            .and_then(|row| row.get(mv.col))
            .copied()
            .unwrap_or_default()
    }

    /// Checks if an in-range square is empty.
    pub fn is_empty(&self, mv: Move) -> bool {
        mv.in_bounds() && self.get(mv) == Square::Empty
    }

    /// Writes a square. Only reachable through the engine, which validates first.
    pub(super) fn set(&mut self, mv: Move, square: Square) {
        self.squares[mv.row][mv.col] = square;
    }

    /// Counts the marks a player has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|&&sq| sq == Square::Occupied(player))
            .count()
    }

    /// Iterates over empty squares in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        Move::ALL.into_iter().filter(|&mv| self.get(mv) == Square::Empty)
    }

    /// Returns all squares as rows.
    pub fn rows(&self) -> &[[Square; 3]; 3] {
        &self.squares
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (r, row) in self.squares.iter().enumerate() {
            for (c, square) in row.iter().enumerate() {
                let symbol = match square {
                    Square::Empty => (r * 3 + c + 1).to_string(),
                    Square::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if c < 2 {
                    result.push('|');
                }
            }
            if r < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// The text did not describe exactly nine squares.
    #[display("Expected 9 squares, found {found}")]
    WrongLength {
        /// Number of squares found.
        found: usize,
    },
    /// A character was not a mark or an empty marker.
    #[display("Unexpected symbol {symbol:?} in board")]
    UnknownSymbol {
        /// The offending character.
        symbol: char,
    },
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine row-major squares: `X`, `O`, or one of `.`, `-`, `_` for
    /// empty. Whitespace, `|` and `/` are treated as separators.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squares = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
            .map(|c| match c.to_ascii_uppercase() {
                'X' => Ok(Square::Occupied(Player::X)),
                'O' => Ok(Square::Occupied(Player::O)),
                '.' | '-' | '_' => Ok(Square::Empty),
                symbol => Err(BoardParseError::UnknownSymbol { symbol }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if squares.len() != 9 {
            return Err(BoardParseError::WrongLength {
                found: squares.len(),
            });
        }

        let mut board = Board::new();
        for (mv, square) in Move::ALL.into_iter().zip(squares) {
            board.set(mv, square);
        }
        Ok(board)
    }
}

/// Outcome of a board, derived from its squares and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Win(Player),
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(*player),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    /// Returns true once no further moves are possible.
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win(player) => write!(f, "Player {} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_board_with_separators() {
        let board: Board = "XO. / .X. / ..O".parse().expect("valid board");
        assert_eq!(board.get(Move::new(0, 0)), Square::Occupied(Player::X));
        assert_eq!(board.get(Move::new(0, 1)), Square::Occupied(Player::O));
        assert_eq!(board.get(Move::new(1, 1)), Square::Occupied(Player::X));
        assert_eq!(board.get(Move::new(2, 2)), Square::Occupied(Player::O));
        assert_eq!(board.count(Player::X), 2);
        assert_eq!(board.count(Player::O), 2);
    }

    #[test]
    fn test_parse_rejects_short_board() {
        let err = "XO.".parse::<Board>().unwrap_err();
        assert_eq!(err, BoardParseError::WrongLength { found: 3 });
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        let err = "XO.Z.....".parse::<Board>().unwrap_err();
        assert_eq!(err, BoardParseError::UnknownSymbol { symbol: 'Z' });
    }

    #[test]
    fn test_display_numbers_empty_squares() {
        let board: Board = "X........".parse().expect("valid board");
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|5|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_out_of_range_reads_empty_but_is_not_playable() {
        let board = Board::new();
        assert_eq!(board.get(Move::new(3, 0)), Square::Empty);
        assert!(!board.is_empty(Move::new(3, 0)));
    }

    #[test]
    fn test_player_parses_case_insensitively() {
        assert_eq!("x".parse::<Player>().expect("x"), Player::X);
        assert_eq!("O".parse::<Player>().expect("O"), Player::O);
        assert!("z".parse::<Player>().is_err());
    }
}
