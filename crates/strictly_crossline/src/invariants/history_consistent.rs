//! History consistency: replaying the history reproduces the board.

use super::super::MatchState;
use super::Invariant;

/// Invariant: the initial layout plus the recorded moves gives the current
/// board.
pub struct HistoryConsistentInvariant;

impl Invariant<MatchState> for HistoryConsistentInvariant {
    fn holds(state: &MatchState) -> bool {
        let mut board = *state.initial_board();
        for entry in state.history() {
            if board.owner(entry.from) != Some(entry.player) || !board.is_empty(entry.to) {
                return false;
            }
            board = board.with_move(entry.action());
        }
        board == *state.board()
    }

    fn description() -> &'static str {
        "Replaying history from the initial layout yields the current board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Player, Position};

    #[test]
    fn test_empty_history_holds() {
        let state = MatchState::new("B...W...B".parse().unwrap());
        assert!(HistoryConsistentInvariant::holds(&state));
    }

    #[test]
    fn test_replay_matches_after_moves() {
        let mut state = MatchState::new("BBBW.W.W.".parse().unwrap());
        let moves = [
            Move::new(Position::TopCenter, Position::Center, Player::Black),
            Move::new(Position::BottomCenter, Position::BottomRight, Player::White),
            Move::new(Position::Center, Position::BottomCenter, Player::Black),
        ];
        for action in moves {
            state.apply_move(action).unwrap();
        }
        assert_eq!(state.history().len(), 3);
        assert!(HistoryConsistentInvariant::holds(&state));
    }
}
