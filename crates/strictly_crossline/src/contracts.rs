//! Contract-based validation for crossline moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P(state, move)} apply {Q(before, after)}`. Preconditions run on every
//! move and fully decide legality before anything is mutated.

use super::action::{IllegalMoveReason, Move, MoveError};
use super::invariants::{CrosslineInvariants, InvariantSet};
use super::rules::is_legal_step;
use super::state::MatchState;
use super::{GameResult, Square};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the match has no winner yet.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with [`MoveError::GameOver`] once a result is recorded.
    pub fn check(state: &MatchState) -> Result<(), MoveError> {
        match state.result() {
            GameResult::Won(winner) => Err(MoveError::GameOver { winner }),
            GameResult::InProgress => Ok(()),
        }
    }
}

/// Precondition: it must be the mover's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`IllegalMoveReason::NotYourTurn`].
    pub fn check(mov: &Move, state: &MatchState) -> Result<(), MoveError> {
        let expected = state.current_player();
        if mov.player != expected {
            Err(MoveError::illegal(*mov, IllegalMoveReason::NotYourTurn { expected }))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the source cell holds one of the mover's pieces.
pub struct SourceOwned;

impl SourceOwned {
    /// Fails when the source is empty or holds the other side's piece.
    pub fn check(mov: &Move, state: &MatchState) -> Result<(), MoveError> {
        match state.board().get(mov.from) {
            Square::Empty => Err(MoveError::illegal(*mov, IllegalMoveReason::SourceEmpty)),
            Square::Occupied(owner) if owner != mov.player => Err(MoveError::illegal(
                *mov,
                IllegalMoveReason::SourceNotOwned { owner },
            )),
            Square::Occupied(_) => Ok(()),
        }
    }
}

/// Precondition: the destination cell is empty.
pub struct DestinationEmpty;

impl DestinationEmpty {
    /// Fails with [`IllegalMoveReason::DestinationOccupied`].
    pub fn check(mov: &Move, state: &MatchState) -> Result<(), MoveError> {
        if state.board().is_empty(mov.to) {
            Ok(())
        } else {
            Err(MoveError::illegal(*mov, IllegalMoveReason::DestinationOccupied))
        }
    }
}

/// Precondition: the step is allowed by the adjacency rule.
pub struct StepAllowed;

impl StepAllowed {
    /// Fails with [`IllegalMoveReason::NotAdjacent`].
    pub fn check(mov: &Move) -> Result<(), MoveError> {
        if is_legal_step(mov.from, mov.to) {
            Ok(())
        } else {
            Err(MoveError::illegal(*mov, IllegalMoveReason::NotAdjacent))
        }
    }
}

/// Composite precondition, checked in a fixed order so the reported
/// reason is stable.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(state))]
    pub fn check(mov: &Move, state: &MatchState) -> Result<(), MoveError> {
        GameNotOver::check(state)?;
        PlayersTurn::check(mov, state)?;
        SourceOwned::check(mov, state)?;
        DestinationEmpty::check(mov, state)?;
        StepAllowed::check(mov)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions: see [`LegalMove`].
///
/// Postconditions:
/// - Piece counts are unchanged
/// - History replays to the current board
/// - Turns alternate starting with Black
pub struct MoveContract;

impl Contract<MatchState, Move> for MoveContract {
    fn pre(state: &MatchState, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, state)
    }

    fn post(_before: &MatchState, after: &MatchState) -> Result<(), MoveError> {
        CrosslineInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Player, Position};

    fn opening() -> MatchState {
        MatchState::new("BBBW.W.W.".parse().unwrap())
    }

    #[test]
    fn test_precondition_accepts_legal_move() {
        let action = Move::new(Position::TopCenter, Position::Center, Player::Black);
        assert!(MoveContract::pre(&opening(), &action).is_ok());
    }

    #[test]
    fn test_turn_checked_before_source() {
        // White's piece, White's intent, Black's turn: the turn is what fails.
        let action = Move::new(Position::MiddleLeft, Position::Center, Player::White);
        assert!(matches!(
            MoveContract::pre(&opening(), &action),
            Err(MoveError::Illegal {
                reason: IllegalMoveReason::NotYourTurn { expected: Player::Black },
                ..
            })
        ));
    }

    #[test]
    fn test_game_over_checked_first() {
        let state = MatchState::new("B.W.BW.WB".parse::<Board>().unwrap());
        let action = Move::new(Position::MiddleLeft, Position::Center, Player::White);
        assert_eq!(
            MoveContract::pre(&state, &action),
            Err(MoveError::GameOver { winner: Player::Black })
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = opening();
        let mut after = before.clone();
        after
            .apply_move(Move::new(Position::TopCenter, Position::Center, Player::Black))
            .unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }
}
