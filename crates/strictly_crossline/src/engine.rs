//! Free-function surface of the rules engine.
//!
//! These wrap [`MatchState`] methods for callers that prefer passing state
//! by value, such as the host session and the integration tests.

use super::{Board, GameResult, Move, MoveError, Player};
use super::state::MatchState;
use rand::Rng;
use tracing::instrument;

/// Starts a match from `board`, or from a generated fair layout.
pub fn initialize(board: Option<Board>) -> MatchState {
    initialize_with_rng(board, &mut rand::thread_rng())
}

/// Like [`initialize`], drawing any generated layout from `rng`.
#[instrument(skip(board, rng), fields(explicit = board.is_some()))]
pub fn initialize_with_rng<R: Rng + ?Sized>(board: Option<Board>, rng: &mut R) -> MatchState {
    match board {
        Some(board) => MatchState::new(board),
        None => MatchState::random(rng),
    }
}

/// Applies `action` to a copy of `state` and returns the new state.
///
/// # Errors
///
/// Same as [`MatchState::apply_move`]. The input state is never modified.
pub fn apply_move(state: &MatchState, action: Move) -> Result<MatchState, MoveError> {
    let mut next = state.clone();
    next.apply_move(action)?;
    Ok(next)
}

/// Records `winner` on `state`. Has no effect once a result exists.
pub fn record_result(state: &mut MatchState, winner: Player) -> GameResult {
    state.record_result(winner);
    state.result()
}
