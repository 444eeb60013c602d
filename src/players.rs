//! Player trait and implementations.
//!
//! A player turns the current match into a [`Command`]. Humans read a line
//! of text; the AI asks the minimax agent.

use anyhow::Result;
use derive_more::{Display, Error};
use std::io::{BufRead, Write};
use strictly_crossline::{Agent, MatchState, MinimaxAgent, Move, MoveError, Position};
use tracing::{debug, instrument};

use crate::render;

/// What a player wants to do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play a move.
    Move(Move),
    /// Abandon this game and start the next one.
    NewGame,
    /// Leave the session.
    Quit,
}

/// Trait for anything that can take a seat in a session.
pub trait Player {
    /// Chooses a command for the side to move in `state`.
    ///
    /// `input` and `output` are the session's terminal. Players that do not
    /// talk to a person ignore them.
    fn next_command(
        &mut self,
        state: &MatchState,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<Command>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Whether a person sits behind this player.
    fn is_human(&self) -> bool {
        false
    }
}

/// A line of human input that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InputError {
    /// Nothing was typed.
    #[display("Enter a move such as `1 5`, or `moves`, `new`, `quit`")]
    Empty,

    /// The line did not contain two cells.
    #[display("Could not read {:?} as a move (expected two cells, e.g. `1 5`)", _0)]
    Unrecognized(#[error(not(source))] String),

    /// A cell was neither a number 1-9 nor a cell name.
    #[display("Unknown cell {:?} (use 1-9 or a name such as top-left)", _0)]
    UnknownCell(#[error(not(source))] String),
}

/// One parsed line of human input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanInput {
    /// Slide a piece from one cell to another.
    Step {
        /// Source cell.
        from: Position,
        /// Destination cell.
        to: Position,
    },
    /// List the legal moves.
    ShowMoves,
    /// Start a new game.
    NewGame,
    /// Quit.
    Quit,
}

/// Parses `1 5`, `1-5`, `1 → 5`, `1->5`, `top-left center`, `moves`, `new`
/// or `quit`.
pub fn parse_input(line: &str) -> Result<HumanInput, InputError> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" => return Err(InputError::Empty),
        "moves" | "m" | "?" => return Ok(HumanInput::ShowMoves),
        "new" | "n" => return Ok(HumanInput::NewGame),
        "quit" | "q" | "exit" => return Ok(HumanInput::Quit),
        _ => {}
    }

    let spaced = line.replace("->", " ").replace(['→', ','], " ");
    let tokens: Vec<&str> = spaced
        .split_whitespace()
        .filter(|token| *token != "-")
        .collect();

    let cell = |s: &str| {
        Position::from_label_or_number(s).ok_or_else(|| InputError::UnknownCell(s.to_string()))
    };
    match tokens.as_slice() {
        [from, to] => Ok(HumanInput::Step {
            from: cell(*from)?,
            to: cell(*to)?,
        }),
        [joined] => split_hyphenated(joined)
            .map(|(from, to)| HumanInput::Step { from, to })
            .ok_or_else(|| InputError::Unrecognized(line.to_string())),
        _ => Err(InputError::Unrecognized(line.to_string())),
    }
}

/// Splits `1-5` or `top-left-center` at the hyphen that leaves a cell on
/// both sides.
fn split_hyphenated(token: &str) -> Option<(Position, Position)> {
    token.match_indices('-').find_map(|(i, _)| {
        let from = Position::from_label_or_number(&token[..i])?;
        let to = Position::from_label_or_number(&token[i + 1..])?;
        Some((from, to))
    })
}

/// Human player typing moves at a terminal.
pub struct HumanPlayer {
    name: String,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for HumanPlayer {
    #[instrument(skip_all, fields(player = %self.name))]
    fn next_command(
        &mut self,
        state: &MatchState,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<Command> {
        let side = state.current_player();
        loop {
            write!(output, "{} ({}) > ", self.name, side)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                debug!("Input closed");
                return Ok(Command::Quit);
            }

            match parse_input(&line) {
                Ok(HumanInput::Step { from, to }) => {
                    return Ok(Command::Move(Move::new(from, to, side)));
                }
                Ok(HumanInput::ShowMoves) => {
                    writeln!(output, "{}", render::legal_moves(&state.legal_moves()))?;
                }
                Ok(HumanInput::NewGame) => return Ok(Command::NewGame),
                Ok(HumanInput::Quit) => return Ok(Command::Quit),
                Err(e) => writeln!(output, "{}", e)?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        true
    }
}

/// Computer player backed by [`MinimaxAgent`].
pub struct AiPlayer {
    name: String,
    agent: MinimaxAgent,
}

impl AiPlayer {
    /// Creates an AI searching `depth` plies.
    pub fn new(name: impl Into<String>, depth: u8) -> Self {
        Self {
            name: name.into(),
            agent: MinimaxAgent::new(depth),
        }
    }
}

impl Player for AiPlayer {
    #[instrument(skip_all, fields(player = %self.name, agent = %self.agent.name()))]
    fn next_command(
        &mut self,
        state: &MatchState,
        _input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<Command> {
        let action = self.agent.best_move(state).ok_or(MoveError::NoLegalMove {
            player: state.current_player(),
        })?;
        writeln!(output, "{} plays {}", self.name, action)?;
        Ok(Command::Move(action))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
