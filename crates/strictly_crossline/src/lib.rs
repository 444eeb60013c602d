//! Crossline game logic.
//!
//! Crossline is a two-player sliding game on a 3x3 board. Each side has
//! three pieces and wins by holding a line through the center. This crate
//! holds the rules engine and a minimax search agent, with no I/O.
//!
//! # Architecture
//!
//! - **Rules**: adjacency and win detection as pure functions over [`Board`]
//! - **State**: [`MatchState`] with contract-checked [`MatchState::apply_move`]
//! - **Invariants**: properties every reachable state satisfies
//! - **Search**: depth-limited minimax with alpha-beta pruning
//!
//! # Example
//!
//! ```
//! use strictly_crossline::{initialize, select_move, Player};
//!
//! let mut state = initialize(Some("BBBW.W.W.".parse().unwrap()));
//! let action = select_move(state.board(), Player::Black, Player::White, 2).unwrap();
//! state.apply_move(action).unwrap();
//! assert_eq!(state.current_player(), Player::White);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod agent;
mod contracts;
mod engine;
pub mod invariants;
pub mod layout;
mod position;
pub mod rules;
mod search;
mod state;
mod types;

pub use action::{IllegalMoveReason, Move, MoveError};
pub use agent::{Agent, MinimaxAgent};
pub use contracts::{
    Contract, DestinationEmpty, GameNotOver, LegalMove, MoveContract, PlayersTurn, SourceOwned,
    StepAllowed,
};
pub use engine::{apply_move, initialize, initialize_with_rng, record_result};
pub use invariants::{CrosslineInvariants, Invariant, InvariantSet, InvariantViolation};
pub use position::Position;
pub use rules::{
    is_winning_position, legal_destinations, legal_moves, winner, winning_line,
};
pub use search::{
    INFINITY, SearchOutcome, WIN_SCORE, choose_move, minimax, search, select_move,
};
pub use state::{HistoryEntry, MatchState, Score};
pub use types::{Board, GameResult, ParseBoardError, Player, Square};
