//! Game orchestration between two seated players.
//!
//! A [`Session`] owns the match state, the two players and the terminal.
//! It asks the side to move for a command, applies moves through the
//! engine, and carries the score from one game to the next.

use crate::config::GameConfig;
use crate::players::{Command, Player};
use crate::render;
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{BufRead, Write};
use strictly_crossline::{Board, MatchState, MoveError, Player as Side, Score};
use tracing::{debug, info, instrument, warn};

/// How a single game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GameOutcome {
    /// A side won.
    #[display("{} wins", _0)]
    Won(Side),
    /// The ply limit was reached without a winner.
    #[display("abandoned (ply limit)")]
    Abandoned,
    /// A player asked for a fresh game.
    #[display("restarted")]
    Restarted,
    /// A player left.
    #[display("quit")]
    Quit,
}

/// Result of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    /// How it ended.
    pub outcome: GameOutcome,
    /// Moves played.
    pub plies: usize,
    /// Cumulative score after the game.
    pub score: Score,
}

/// A sequence of games between two players on one terminal.
pub struct Session<R, W> {
    state: MatchState,
    black: Box<dyn Player>,
    white: Box<dyn Player>,
    max_plies: usize,
    rng: StdRng,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session. The first game starts from `layout`, or from a
    /// generated layout seeded by the config.
    #[instrument(skip_all, fields(black = black.name(), white = white.name()))]
    pub fn new(
        black: Box<dyn Player>,
        white: Box<dyn Player>,
        layout: Option<Board>,
        config: &GameConfig,
        input: R,
        output: W,
    ) -> Self {
        let mut rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };
        let state = strictly_crossline::initialize_with_rng(layout, &mut rng);
        info!(layout = %state.board(), "Session created");
        Self {
            state,
            black,
            white,
            max_plies: *config.max_plies() as usize,
            rng,
            input,
            output,
        }
    }

    /// Current match state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Cumulative score.
    pub fn score(&self) -> Score {
        self.state.score()
    }

    /// Everything written to the terminal so far.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Plays the current game until it ends, is abandoned, or a player
    /// restarts or quits.
    ///
    /// Illegal moves from a human are reported and asked for again. An
    /// illegal move from any other player is an error.
    #[instrument(skip(self), fields(layout = %self.state.board()))]
    pub fn play_game(&mut self) -> Result<GameSummary> {
        writeln!(self.output, "{}", render::board(&self.state))?;

        loop {
            if let Some(winner) = self.state.winner() {
                writeln!(self.output, "{}", render::score(&self.state.score()))?;
                return Ok(self.summary(GameOutcome::Won(winner)));
            }

            let plies = self.state.history().len();
            if plies >= self.max_plies {
                warn!(plies, "Ply limit reached, abandoning game");
                writeln!(self.output, "No winner after {} moves, game abandoned.", plies)?;
                return Ok(self.summary(GameOutcome::Abandoned));
            }

            let player = match self.state.current_player() {
                Side::Black => &mut self.black,
                Side::White => &mut self.white,
            };
            let human = player.is_human();
            let command = player.next_command(&self.state, &mut self.input, &mut self.output)?;
            debug!(player = player.name(), ?command, "Command received");

            match command {
                Command::Move(action) => match self.state.apply_move(action) {
                    Ok(_) => writeln!(self.output, "{}", render::board(&self.state))?,
                    Err(MoveError::Illegal { reason, .. }) if human => {
                        writeln!(self.output, "Invalid move! {}", reason)?;
                    }
                    Err(e) => return Err(e.into()),
                },
                Command::NewGame => {
                    info!("Game restarted by player");
                    return Ok(self.summary(GameOutcome::Restarted));
                }
                Command::Quit => {
                    info!("Player quit");
                    return Ok(self.summary(GameOutcome::Quit));
                }
            }
        }
    }

    /// Starts the next game from a generated layout, keeping the score.
    pub fn new_game(&mut self) {
        self.state = self.state.new_game_with_rng(None, &mut self.rng);
    }

    /// Asks any human at the table whether to play again. Sessions with no
    /// human always continue.
    pub fn confirm_rematch(&mut self) -> Result<bool> {
        if !self.black.is_human() && !self.white.is_human() {
            return Ok(true);
        }
        write!(self.output, "Play again? [Y/n] ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let answer = line.trim().to_ascii_lowercase();
        Ok(!matches!(answer.as_str(), "n" | "no" | "q" | "quit"))
    }

    /// Plays games until a player quits, a human declines a rematch, or
    /// `games` games have been played.
    #[instrument(skip(self))]
    pub fn run(&mut self, games: Option<usize>) -> Result<Vec<GameSummary>> {
        let mut summaries = Vec::new();
        loop {
            let summary = self.play_game()?;
            info!(outcome = %summary.outcome, plies = summary.plies, score = %summary.score, "Game finished");
            summaries.push(summary);

            if summary.outcome == GameOutcome::Quit {
                break;
            }
            if games.is_some_and(|n| summaries.len() >= n) {
                break;
            }
            if summary.outcome != GameOutcome::Restarted && !self.confirm_rematch()? {
                break;
            }
            self.new_game();
        }

        writeln!(self.output, "Final {}", render::score(&self.state.score()))?;
        Ok(summaries)
    }

    fn summary(&self, outcome: GameOutcome) -> GameSummary {
        GameSummary {
            outcome,
            plies: self.state.history().len(),
            score: self.state.score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::{AiPlayer, HumanPlayer};
    use std::io::Cursor;

    fn config(toml: &str) -> GameConfig {
        GameConfig::from_toml(toml).unwrap()
    }

    #[test]
    fn test_human_win_scores() {
        let mut session = Session::new(
            Box::new(HumanPlayer::new("Alice")),
            Box::new(AiPlayer::new("Computer", 2)),
            Some("B.WW.B.WB".parse().unwrap()),
            &config(""),
            Cursor::new("6 5\nn\n"),
            Vec::new(),
        );
        let summaries = session.run(None).unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].outcome, GameOutcome::Won(Side::Black));
        assert_eq!(summaries[0].plies, 1);
        assert_eq!(session.score(), Score::new(1, 0));
    }

    #[test]
    fn test_illegal_human_move_reprompts() {
        let mut session = Session::new(
            Box::new(HumanPlayer::new("Alice")),
            Box::new(AiPlayer::new("Computer", 2)),
            Some("BBBW.W.W.".parse().unwrap()),
            &config(""),
            Cursor::new("1 9\n2 5\nquit\n"),
            Vec::new(),
        );
        let summary = session.play_game().unwrap();

        assert_eq!(summary.outcome, GameOutcome::Quit);
        assert_eq!(summary.plies, 2);
        let text = String::from_utf8(session.output().clone()).unwrap();
        assert!(text.contains("Invalid move! "));
    }

    #[test]
    fn test_ply_limit_abandons() {
        let mut session = Session::new(
            Box::new(AiPlayer::new("One", 2)),
            Box::new(AiPlayer::new("Two", 2)),
            None,
            &config("max_plies = 1\nseed = 7"),
            std::io::empty(),
            Vec::new(),
        );
        let summary = session.play_game().unwrap();
        assert_eq!(summary.outcome, GameOutcome::Abandoned);
        assert_eq!(summary.plies, 1);
        assert_eq!(summary.score.total(), 0);
    }

    #[test]
    fn test_restart_skips_rematch_prompt() {
        let mut session = Session::new(
            Box::new(HumanPlayer::new("Alice")),
            Box::new(HumanPlayer::new("Bob")),
            Some("BBBW.W.W.".parse().unwrap()),
            &config("seed = 3"),
            Cursor::new("new\nquit\n"),
            Vec::new(),
        );
        let summaries = session.run(None).unwrap();
        let outcomes: Vec<_> = summaries.iter().map(|s| s.outcome).collect();
        assert_eq!(outcomes, vec![GameOutcome::Restarted, GameOutcome::Quit]);
        assert!(session.state().history().is_empty());
    }
}
