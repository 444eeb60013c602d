//! Alternating turn invariant: Black, White, Black, ...

use super::super::{GameResult, MatchState, Player};
use super::Invariant;

/// Invariant: sides alternate starting with Black.
///
/// While the match runs, the side to move is the one that did not make the
/// last move. A move that decides the game leaves `current_player` on the
/// mover; a result recorded between moves leaves it on the side to move.
pub struct AlternatingTurnInvariant;

impl Invariant<MatchState> for AlternatingTurnInvariant {
    fn holds(state: &MatchState) -> bool {
        let history = state.history();

        if let Some(first) = history.first() {
            if first.player != Player::Black {
                return false;
            }
        }

        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        let current = state.current_player();
        match (state.result(), history.last().map(|e| e.player)) {
            (_, None) => current == Player::Black,
            (GameResult::InProgress, Some(mover)) => current == mover.opponent(),
            (GameResult::Won(_), Some(_)) => true,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns (Black, White, Black, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::check_match;
    use crate::{Board, Move, Position, record_result};

    #[test]
    fn test_fresh_match_holds() {
        let state = MatchState::new("BBBW.W.W.".parse().unwrap());
        assert!(AlternatingTurnInvariant::holds(&state));
    }

    #[test]
    fn test_single_move_holds() {
        let mut state = MatchState::new("BBBW.W.W.".parse().unwrap());
        state
            .apply_move(Move::new(Position::TopCenter, Position::Center, Player::Black))
            .unwrap();
        assert_eq!(state.current_player(), Player::White);
        assert!(AlternatingTurnInvariant::holds(&state));
    }

    #[test]
    fn test_winner_keeps_turn() {
        let board = Board::with_pieces(
            &[Position::TopLeft, Position::MiddleRight, Position::BottomRight],
            &[Position::TopCenter, Position::MiddleLeft, Position::BottomCenter],
        );
        let mut state = MatchState::new(board);
        state
            .apply_move(Move::new(Position::MiddleRight, Position::Center, Player::Black))
            .unwrap();
        assert!(state.is_over());
        assert!(AlternatingTurnInvariant::holds(&state));
    }

    #[test]
    fn test_result_recorded_between_moves_holds() {
        let mut state = MatchState::new("BBBW.W.W.".parse().unwrap());
        state
            .apply_move(Move::new(Position::TopRight, Position::Center, Player::Black))
            .unwrap();
        record_result(&mut state, Player::White);
        assert_eq!(state.current_player(), Player::White);
        assert!(AlternatingTurnInvariant::holds(&state));
        assert!(check_match(&state).is_ok());
    }

    #[test]
    fn test_wrong_side_to_move_fails() {
        let mut state = MatchState::new("BBBW.W.W.".parse().unwrap());
        state
            .apply_move(Move::new(Position::TopRight, Position::Center, Player::Black))
            .unwrap();
        let mut json = serde_json::to_value(&state).unwrap();
        json["current_player"] = serde_json::json!("black");
        let corrupted: MatchState = serde_json::from_value(json).unwrap();
        assert!(!AlternatingTurnInvariant::holds(&corrupted));
    }
}
