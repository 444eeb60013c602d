//! Computer players.

use super::search::search;
use super::state::MatchState;
use super::Move;
use tracing::{debug, instrument};

/// Something that can pick a move for the side to move.
pub trait Agent {
    /// Best move for the side to move, or `None` if the match is over or
    /// that side cannot move.
    fn best_move(&mut self, state: &MatchState) -> Option<Move>;

    /// Display name of the agent.
    fn name(&self) -> &str;
}

/// Fixed-depth minimax agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimaxAgent {
    name: String,
    depth: u8,
}

impl MinimaxAgent {
    /// Creates an agent searching `depth` plies.
    pub fn new(depth: u8) -> Self {
        Self {
            name: format!("Minimax(depth={})", depth),
            depth,
        }
    }

    /// Search depth in plies.
    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl Agent for MinimaxAgent {
    #[instrument(skip(self, state), fields(agent = %self.name))]
    fn best_move(&mut self, state: &MatchState) -> Option<Move> {
        if state.is_over() {
            return None;
        }
        let ai = state.current_player();
        let outcome = search(state.board(), ai, ai.opponent(), self.depth);
        debug!(nodes = outcome.nodes, score = outcome.score, "Agent searched");
        outcome.best_move
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position};

    #[test]
    fn test_name_includes_depth() {
        assert_eq!(MinimaxAgent::new(3).name(), "Minimax(depth=3)");
    }

    #[test]
    fn test_plays_side_to_move() {
        let mut state = MatchState::new("BBBW.W.W.".parse().unwrap());
        let mut agent = MinimaxAgent::new(2);

        let first = agent.best_move(&state).unwrap();
        assert_eq!(first.player, Player::Black);
        state.apply_move(first).unwrap();

        let second = agent.best_move(&state).unwrap();
        assert_eq!(second.player, Player::White);
    }

    #[test]
    fn test_none_once_over() {
        let state = MatchState::new("B.W.BW.WB".parse().unwrap());
        assert!(state.is_over());
        assert_eq!(MinimaxAgent::new(2).best_move(&state), None);
    }

    #[test]
    fn test_none_when_blockaded() {
        // Black to move with nowhere to go: the state starts decided.
        let state = MatchState::new(crate::Board::with_pieces(
            &[Position::TopLeft],
            &[Position::TopCenter, Position::MiddleLeft, Position::Center],
        ));
        assert_eq!(MinimaxAgent::new(2).best_move(&state), None);
    }
}
