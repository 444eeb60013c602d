//! Match state: board, turn, result, history and the running score.
//!
//! A [`MatchState`] is an ordinary value owned by the caller. Every engine
//! operation takes it explicitly; there is no hidden session.

use super::contracts::{Contract, MoveContract};
use super::layout;
use super::rules::{has_legal_move, is_winning_position, winner};
use super::{Board, GameResult, Move, MoveError, Player, Position};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// One applied move with the wall-clock time it was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The side that moved.
    pub player: Player,
    /// The cell the piece left.
    pub from: Position,
    /// The cell the piece landed on.
    pub to: Position,
    /// When the move was applied.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// The move this entry records.
    pub fn action(&self) -> Move {
        Move::new(self.from, self.to, self.player)
    }

    /// Time of day as `HH:MM:SS`.
    pub fn clock(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.clock(), self.action())
    }
}

/// Cumulative wins per side across games of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    black: u32,
    white: u32,
}

impl Score {
    /// Creates a score with the given win counts.
    pub fn new(black: u32, white: u32) -> Self {
        Self { black, white }
    }

    /// Wins recorded for `player`.
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Total games decided so far.
    pub fn total(&self) -> u32 {
        self.black + self.white
    }

    fn increment(&mut self, player: Player) {
        match player {
            Player::Black => self.black += 1,
            Player::White => self.white += 1,
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Black {} - {} White", self.black, self.white)
    }
}

/// Complete state of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Layout the match started from; history replays from here.
    initial_board: Board,
    /// Current board.
    board: Board,
    /// Side to move. A winning move leaves it on the mover.
    current_player: Player,
    /// Match status.
    result: GameResult,
    /// Applied moves, oldest first.
    history: Vec<HistoryEntry>,
    /// Wins carried across `new_game` resets.
    score: Score,
}

impl MatchState {
    /// Starts a match from an explicit layout with a zero score.
    #[instrument(skip(board), fields(layout = %board))]
    pub fn new(board: Board) -> Self {
        Self::with_score(board, Score::default())
    }

    /// Starts a match from an explicit layout, carrying `score` forward.
    ///
    /// A layout that already contains a winning line starts as won, and a
    /// layout where Black cannot move starts as a blockade win for White.
    /// Neither credits the score, since no move decided the game.
    #[instrument(skip(board, score), fields(layout = %board, score = %score))]
    pub fn with_score(board: Board, score: Score) -> Self {
        let mut result = GameResult::InProgress;

        if let Some(player) = winner(&board) {
            warn!(%player, "Layout already contains a winning line");
            result = GameResult::Won(player);
        } else if !has_legal_move(&board, Player::Black) {
            warn!("Black cannot move in the starting layout, White wins by blockade");
            result = GameResult::Won(Player::White);
        }

        info!(%result, "New match");
        Self {
            initial_board: board,
            board,
            current_player: Player::Black,
            result,
            history: Vec::new(),
            score,
        }
    }

    /// Starts a match from a generated fair layout.
    #[instrument(skip(rng))]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(layout::fair_layout(rng))
    }

    /// Returns the layout the match started from.
    pub fn initial_board(&self) -> &Board {
        &self.initial_board
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the match status.
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Returns the move history, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the cumulative score.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Whether the match has a winner.
    pub fn is_over(&self) -> bool {
        self.result != GameResult::InProgress
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.result.winner()
    }

    /// Legal moves for the side to move; empty once the match is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        super::rules::legal_moves(&self.board, self.current_player)
    }

    /// Validates and applies a move, stamping it with the current time.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the match already has a winner.
    /// - [`MoveError::Illegal`] if any precondition fails.
    ///
    /// The state is untouched when an error is returned.
    pub fn apply_move(&mut self, action: Move) -> Result<GameResult, MoveError> {
        self.apply_move_at(action, Utc::now())
    }

    /// Like [`apply_move`](Self::apply_move) with an explicit timestamp.
    #[instrument(skip(self, action, timestamp), fields(action = %action, layout = %self.board))]
    pub fn apply_move_at(
        &mut self,
        action: Move,
        timestamp: DateTime<Utc>,
    ) -> Result<GameResult, MoveError> {
        MoveContract::pre(self, &action).inspect_err(|e| {
            warn!(error = %e, "Move rejected");
        })?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board.relocate(action.from, action.to);
        self.history.push(HistoryEntry {
            player: action.player,
            from: action.from,
            to: action.to,
            timestamp,
        });

        let opponent = action.player.opponent();
        if is_winning_position(&self.board, action.player) {
            self.record_result(action.player);
        } else if !has_legal_move(&self.board, opponent) {
            info!(blocked = %opponent, "Opponent has no legal move");
            self.record_result(action.player);
        } else {
            self.current_player = opponent;
        }

        // Postcondition: in debug builds a violated invariant rolls back.
        #[cfg(debug_assertions)]
        {
            if let Err(e) = MoveContract::post(&before, self) {
                *self = before;
                return Err(e);
            }
        }

        debug!(result = %self.result, layout = %self.board, "Move applied");
        Ok(self.result)
    }

    /// Marks the match as won by `winner` and credits the score.
    ///
    /// Terminal: a match that already has a winner is left unchanged.
    #[instrument(skip(self))]
    pub fn record_result(&mut self, winner: Player) {
        if let GameResult::Won(existing) = self.result {
            warn!(%existing, "Result already recorded");
            return;
        }
        self.result = GameResult::Won(winner);
        self.score.increment(winner);
        info!(%winner, score = %self.score, "Match won");
    }

    /// Starts the next match, keeping the score. With no layout a fair one
    /// is generated from the thread-local RNG.
    pub fn new_game(&self, board: Option<Board>) -> MatchState {
        self.new_game_with_rng(board, &mut rand::thread_rng())
    }

    /// Starts the next match, keeping the score, generating from `rng`.
    #[instrument(skip(self, board, rng), fields(score = %self.score))]
    pub fn new_game_with_rng<R: Rng + ?Sized>(
        &self,
        board: Option<Board>,
        rng: &mut R,
    ) -> MatchState {
        let board = board.unwrap_or_else(|| layout::fair_layout(rng));
        Self::with_score(board, self.score)
    }
}
