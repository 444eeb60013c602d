//! Win detection logic for crossline.

use super::super::{Board, Player, Position, Square};
use tracing::instrument;

/// The four winning lines. Every one passes through the center.
pub const WINNING_LINES: [[Position; 3]; 4] = [
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
];

/// Returns the first line fully held by `player`, if any.
pub fn winning_line(board: &Board, player: Player) -> Option<[Position; 3]> {
    WINNING_LINES
        .iter()
        .copied()
        .find(|line| line.iter().all(|&pos| board.get(pos) == Square::Occupied(player)))
}

/// True iff `player` holds all three cells of a winning line.
#[instrument(level = "trace", skip(board), fields(board = %board))]
pub fn is_winning_position(board: &Board, player: Player) -> bool {
    winning_line(board, player).is_some()
}

/// Returns the side holding a winning line, if any.
///
/// At most one side can: every line needs the center.
pub fn winner(board: &Board) -> Option<Player> {
    match board.owner(Position::Center) {
        Some(player) if winning_line(board, player).is_some() => Some(player),
        _ => None,
    }
}
