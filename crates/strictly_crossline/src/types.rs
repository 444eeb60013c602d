//! Core domain types for crossline.

use super::action::Move;
use super::position::Position;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Side in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Black (moves first).
    #[display("Black")]
    Black,
    /// White.
    #[display("White")]
    White,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Single-character symbol used in layout strings.
    pub fn symbol(self) -> char {
        match self {
            Player::Black => 'B',
            Player::White => 'W',
        }
    }
}

impl FromStr for Player {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Player::Black),
            "w" | "white" => Ok(Player::White),
            other => Err(ParseBoardError::UnknownPlayer(other.to_string())),
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty cell.
    Empty,
    /// Cell holding a piece.
    Occupied(Player),
}

/// 3x3 crossline board.
///
/// Boards are small `Copy` values, so the search clones them freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board with the given cells filled for each side.
    pub fn with_pieces(black: &[Position], white: &[Position]) -> Self {
        let mut board = Self::new();
        for &pos in black {
            board.set(pos, Square::Occupied(Player::Black));
        }
        for &pos in white {
            board.set(pos, Square::Occupied(Player::White));
        }
        board
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns the owner of the piece at `pos`, if any.
    pub fn owner(&self, pos: Position) -> Option<Player> {
        match self.get(pos) {
            Square::Occupied(player) => Some(player),
            Square::Empty => None,
        }
    }

    /// Moves whatever sits on `from` to `to`, leaving `from` empty.
    ///
    /// No legality checks; callers validate first.
    pub(crate) fn relocate(&mut self, from: Position, to: Position) {
        let piece = self.get(from);
        self.set(from, Square::Empty);
        self.set(to, piece);
    }

    /// Copy of this board with `action` played, without validation.
    pub fn with_move(&self, action: Move) -> Board {
        let mut next = *self;
        next.relocate(action.from, action.to);
        next
    }

    /// Positions holding a piece of `player`, ascending.
    pub fn pieces(&self, player: Player) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|&pos| self.owner(pos) == Some(player))
            .collect()
    }

    /// Number of pieces `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Compact nine-character layout, e.g. `BBBW.W.W.`.
    pub fn layout(&self) -> String {
        self.squares
            .iter()
            .map(|s| match s {
                Square::Empty => '.',
                Square::Occupied(p) => p.symbol(),
            })
            .collect()
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Empty cells show their 1-based number so players can type moves.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(p) => p.symbol().to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.layout())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses a layout string. Whitespace, `|` and `/` are ignored so
    /// `"BBB/W.W/.W."` works too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
            .collect();
        if cells.len() != 9 {
            return Err(ParseBoardError::WrongLength(cells.len()));
        }

        let mut board = Board::new();
        for (pos, c) in Position::ALL.iter().zip(cells) {
            let square = match c {
                'B' | 'b' => Square::Occupied(Player::Black),
                'W' | 'w' => Square::Occupied(Player::White),
                '.' | '-' | '_' => Square::Empty,
                other => return Err(ParseBoardError::UnknownCell(other)),
            };
            board.set(*pos, square);
        }
        Ok(board)
    }
}

/// Error parsing a board layout or player name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseBoardError {
    /// Layout did not contain exactly nine cells.
    #[display("Layout must have 9 cells, found {}", _0)]
    WrongLength(usize),

    /// Unrecognized cell character.
    #[display("Unknown cell character {:?} (use B, W or .)", _0)]
    UnknownCell(char),

    /// Unrecognized player name.
    #[display("Unknown player {:?} (use black or white)", _0)]
    UnknownPlayer(String),
}

impl std::error::Error for ParseBoardError {}

/// Current status of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Match is ongoing.
    InProgress,
    /// Match ended with a winner.
    Won(Player),
}

impl GameResult {
    /// Returns the winner if the match is over.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Won(player) => Some(*player),
            GameResult::InProgress => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "In progress"),
            GameResult::Won(player) => write!(f, "{} wins", player),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout() {
        let board: Board = "BBB/W.W/.W.".parse().unwrap();
        assert_eq!(
            board.pieces(Player::Black),
            vec![Position::TopLeft, Position::TopCenter, Position::TopRight]
        );
        assert_eq!(
            board.pieces(Player::White),
            vec![Position::MiddleLeft, Position::MiddleRight, Position::BottomCenter]
        );
        assert_eq!(board.layout(), "BBBW.W.W.");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "BBB".parse::<Board>(),
            Err(ParseBoardError::WrongLength(3))
        );
        assert_eq!(
            "BBBX.W.W.".parse::<Board>(),
            Err(ParseBoardError::UnknownCell('X'))
        );
    }

    #[test]
    fn test_relocate_keeps_piece_count() {
        let mut board: Board = "B...W....".parse().unwrap();
        board.relocate(Position::TopLeft, Position::TopCenter);
        assert!(board.is_empty(Position::TopLeft));
        assert_eq!(board.owner(Position::TopCenter), Some(Player::Black));
        assert_eq!(board.count(Player::Black), 1);
        assert_eq!(board.count(Player::White), 1);
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board: Board = "B...W...W".parse().unwrap();
        assert_eq!(board.display(), "B|2|3\n-+-+-\n4|W|6\n-+-+-\n7|8|W");
    }

    #[test]
    fn test_player_parse() {
        assert_eq!("black".parse::<Player>(), Ok(Player::Black));
        assert_eq!("W".parse::<Player>(), Ok(Player::White));
        assert!("red".parse::<Player>().is_err());
    }
}
