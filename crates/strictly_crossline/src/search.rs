//! Depth-limited minimax with alpha-beta pruning.
//!
//! The computer is the minimizer and its opponent the maximizer. Scores are
//! `+1` (maximizer wins), `-1` (minimizer wins) and `0` (undecided at the
//! horizon). There is no positional evaluation beyond that.
//!
//! The search only ever sees [`Board`] values. Boards are `Copy`, so each
//! recursive call works on its own copy and the live match is untouched.

use super::rules::{is_winning_position, legal_moves};
use super::state::MatchState;
use super::{Board, Move, MoveError, Player};
use tracing::{debug, instrument};

/// Score of a position the maximizer has won.
pub const WIN_SCORE: i32 = 1;

/// Bound wider than any score, used to open a search window.
pub const INFINITY: i32 = 1_000;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Chosen move, or `None` when the searching side cannot move.
    pub best_move: Option<Move>,
    /// Minimax score of the chosen move (lower is better for the searcher).
    pub score: i32,
    /// Nodes visited, root children included.
    pub nodes: u64,
}

/// Colors and counters shared by every node of one search.
struct SearchInfo {
    maximizer: Player,
    minimizer: Player,
    nodes: u64,
}

impl SearchInfo {
    fn new(maximizer: Player, minimizer: Player) -> Self {
        Self {
            maximizer,
            minimizer,
            nodes: 0,
        }
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if is_winning_position(board, self.maximizer) {
            return WIN_SCORE;
        }
        if is_winning_position(board, self.minimizer) {
            return -WIN_SCORE;
        }
        if depth == 0 {
            return 0;
        }

        let mover = if maximizing {
            self.maximizer
        } else {
            self.minimizer
        };
        let moves = legal_moves(board, mover);

        // A side that cannot move forfeits.
        if moves.is_empty() {
            return if maximizing { -WIN_SCORE } else { WIN_SCORE };
        }

        if maximizing {
            let mut best = -INFINITY;
            for action in moves {
                let score = self.minimax(&board.with_move(action), depth - 1, false, alpha, beta);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = INFINITY;
            for action in moves {
                let score = self.minimax(&board.with_move(action), depth - 1, true, alpha, beta);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

/// Scores `board` with `maximizer` and `minimizer` as the two sides.
///
/// `maximizing` says which side is to move.
pub fn minimax(
    board: &Board,
    depth: u8,
    maximizing: bool,
    alpha: i32,
    beta: i32,
    maximizer: Player,
    minimizer: Player,
) -> i32 {
    SearchInfo::new(maximizer, minimizer).minimax(board, depth, maximizing, alpha, beta)
}

/// Searches every move of `ai` and returns the lowest-scoring one.
///
/// Each root candidate is scored with a fresh window at `max_depth - 1`
/// remaining plies. Ties keep the earliest candidate in generation order.
#[instrument(skip(board), fields(board = %board))]
pub fn search(board: &Board, ai: Player, opponent: Player, max_depth: u8) -> SearchOutcome {
    let mut info = SearchInfo::new(opponent, ai);
    let child_depth = max_depth.saturating_sub(1);

    let mut best_move = None;
    let mut best_score = INFINITY;

    for action in legal_moves(board, ai) {
        let child = board.with_move(action);
        let score = info.minimax(&child, child_depth, true, -INFINITY, INFINITY);
        debug!(%action, score, "Scored candidate");
        if score < best_score {
            best_score = score;
            best_move = Some(action);
        }
    }

    if best_move.is_none() {
        best_score = 0;
    }

    debug!(
        best_move = ?best_move.map(|m| m.to_string()),
        score = best_score,
        nodes = info.nodes,
        "Search complete"
    );

    SearchOutcome {
        best_move,
        score: best_score,
        nodes: info.nodes,
    }
}

/// Best move for `ai` against `opponent`, or `None` if `ai` cannot move.
pub fn select_move(board: &Board, ai: Player, opponent: Player, max_depth: u8) -> Option<Move> {
    search(board, ai, opponent, max_depth).best_move
}

/// Picks a move for the side to move in `state`.
///
/// # Errors
///
/// - [`MoveError::GameOver`] if the match already has a winner.
/// - [`MoveError::NoLegalMove`] if the side to move has no candidates.
#[instrument(skip(state), fields(layout = %state.board(), to_move = %state.current_player()))]
pub fn choose_move(state: &MatchState, depth: u8) -> Result<Move, MoveError> {
    if let Some(winner) = state.winner() {
        return Err(MoveError::GameOver { winner });
    }
    let player = state.current_player();
    select_move(state.board(), player, player.opponent(), depth)
        .ok_or(MoveError::NoLegalMove { player })
}
