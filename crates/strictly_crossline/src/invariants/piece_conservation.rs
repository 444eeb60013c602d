//! Piece conservation: moves relocate pieces, they never add or remove them.

use super::super::{MatchState, Player};
use super::Invariant;
use strum::IntoEnumIterator;

/// Invariant: each side keeps as many pieces as it started with.
pub struct PieceConservationInvariant;

impl Invariant<MatchState> for PieceConservationInvariant {
    fn holds(state: &MatchState) -> bool {
        Player::iter().all(|p| state.board().count(p) == state.initial_board().count(p))
    }

    fn description() -> &'static str {
        "Each side keeps the same number of pieces"
    }
}
