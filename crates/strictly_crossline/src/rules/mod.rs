//! Game rules for crossline.
//!
//! Pure functions over [`Board`](super::Board) values. Rules are kept apart
//! from match bookkeeping so the engine and the search share one definition
//! of legality and of winning.

pub mod adjacency;
pub mod win;

pub use adjacency::{
    EXCLUDED_PAIRS, has_legal_move, is_legal_step, legal_destinations, legal_moves, neighbors,
};
pub use win::{WINNING_LINES, is_winning_position, winner, winning_line};
