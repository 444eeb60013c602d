//! Crossline terminal host.
//!
//! Wires the `strictly_crossline` engine to a line-oriented terminal.
//!
//! # Architecture
//!
//! - **Config**: TOML file, environment and command-line overrides
//! - **Players**: humans typing moves and the minimax agent behind one trait
//! - **Session**: the game loop, score carried across games
//! - **Render**: plain-text board, move list, history and score
//!
//! # Example
//!
//! ```no_run
//! use crossline::{AiPlayer, GameConfig, HumanPlayer, Session};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default();
//! let stdin = std::io::stdin();
//! let mut session = Session::new(
//!     Box::new(HumanPlayer::new("You")),
//!     Box::new(AiPlayer::new("Computer", *config.search_depth())),
//!     None,
//!     &config,
//!     stdin.lock(),
//!     std::io::stdout(),
//! );
//! session.run(None)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod players;
pub mod render;
mod session;

// Crate-level exports - Configuration
pub use config::{
    ConfigError, ConfigOverrides, ENV_MAX_PLIES, ENV_SEARCH_DEPTH, ENV_SEED, GameConfig,
    MAX_SEARCH_DEPTH, OpponentKind,
};

// Crate-level exports - Players
pub use players::{AiPlayer, Command, HumanInput, HumanPlayer, InputError, Player, parse_input};

// Crate-level exports - Session management
pub use session::{GameOutcome, GameSummary, Session};

// Crate-level exports - Core engine
pub use strictly_crossline::{
    Board, GameResult, HistoryEntry, IllegalMoveReason, MatchState, Move, MoveError, Position,
    Score, SearchOutcome, apply_move, choose_move, initialize, initialize_with_rng,
    is_winning_position, legal_destinations, legal_moves, search, select_move,
};

/// Piece color, named apart from the [`Player`] seat trait.
pub use strictly_crossline::Player as Side;
