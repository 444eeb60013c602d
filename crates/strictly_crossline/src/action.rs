//! First-class action types for crossline.
//!
//! Moves are domain events, not side effects. They carry the player's
//! intent and are validated in full before the engine touches any state.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A move: `player` slides the piece on `from` to the empty cell `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The cell the piece leaves.
    pub from: Position,
    /// The cell the piece lands on.
    pub to: Position,
    /// The player making the move.
    pub player: Player,
}

impl Move {
    /// Creates a new move.
    pub fn new(from: Position, to: Position, player: Player) -> Self {
        Self { from, to, player }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> Player {
        self.player
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} → {}", self.player, self.from.number(), self.to.number())
    }
}

/// Why a move was rejected as illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum IllegalMoveReason {
    /// The mover is not the side to move.
    #[display("it is {expected}'s turn")]
    NotYourTurn {
        /// The side whose turn it actually is.
        expected: Player,
    },

    /// There is no piece on the source cell.
    #[display("the source cell is empty")]
    SourceEmpty,

    /// The source cell holds the other side's piece.
    #[display("the source piece belongs to {owner}")]
    SourceNotOwned {
        /// Owner of the piece on the source cell.
        owner: Player,
    },

    /// The destination cell already holds a piece.
    #[display("the destination cell is occupied")]
    DestinationOccupied,

    /// The destination is not reachable in one step from the source.
    #[display("the destination is not reachable from the source")]
    NotAdjacent,
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// A precondition of the move was violated.
    #[display("Invalid move ({action}): {reason}")]
    Illegal {
        /// The rejected move.
        action: Move,
        /// The violated precondition.
        reason: IllegalMoveReason,
    },

    /// The match already has a winner.
    #[display("Game is over, {winner} won")]
    GameOver {
        /// Winner of the finished match.
        winner: Player,
    },

    /// The side asked to move has no legal move.
    #[display("{player} has no legal move")]
    NoLegalMove {
        /// The side with no candidates.
        player: Player,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl MoveError {
    /// Shorthand for an illegal-move error.
    pub fn illegal(action: Move, reason: IllegalMoveReason) -> Self {
        MoveError::Illegal { action, reason }
    }
}

impl std::error::Error for MoveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display_is_one_based() {
        let mv = Move::new(Position::TopLeft, Position::Center, Player::Black);
        assert_eq!(mv.to_string(), "Black: 1 → 5");
    }

    #[test]
    fn test_error_messages() {
        let mv = Move::new(Position::TopCenter, Position::MiddleLeft, Player::White);
        let err = MoveError::illegal(mv, IllegalMoveReason::NotAdjacent);
        assert_eq!(
            err.to_string(),
            "Invalid move (White: 2 → 4): the destination is not reachable from the source"
        );
        assert_eq!(
            MoveError::GameOver { winner: Player::Black }.to_string(),
            "Game is over, Black won"
        );
    }
}
