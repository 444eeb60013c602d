//! Random starting layouts.
//!
//! A fair layout gives each side three pieces, has no winner, and gives
//! neither side a win in one move. Generation draws shuffled layouts until
//! one is fair or the attempt budget runs out.

use super::rules::{is_winning_position, legal_moves, winner};
use super::{Board, Player, Position, Square};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument, warn};

/// Shuffled layouts tried before falling back to any win-free layout.
pub const MAX_FAIR_ATTEMPTS: usize = 100;

/// Pieces each side starts with.
pub const PIECES_PER_SIDE: usize = 3;

/// Shuffles the nine cells and fills the first three with Black, the next
/// three with White.
pub fn random_layout<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let mut cells = Position::ALL;
    cells.shuffle(rng);

    let mut board = Board::new();
    for (i, &pos) in cells.iter().take(2 * PIECES_PER_SIDE).enumerate() {
        let player = if i < PIECES_PER_SIDE {
            Player::Black
        } else {
            Player::White
        };
        board.set(pos, Square::Occupied(player));
    }
    board
}

/// True if some legal move by `player` completes a winning line.
pub fn can_win_next_move(board: &Board, player: Player) -> bool {
    legal_moves(board, player)
        .into_iter()
        .any(|action| is_winning_position(&board.with_move(action), player))
}

/// No winner and no immediate win for either side.
pub fn is_fair(board: &Board) -> bool {
    winner(board).is_none()
        && !can_win_next_move(board, Player::Black)
        && !can_win_next_move(board, Player::White)
}

/// Generates a fair layout.
///
/// After [`MAX_FAIR_ATTEMPTS`] rejected draws, falls back to the first
/// layout with no winner, which may still allow a win in one.
pub fn fair_layout<R: Rng + ?Sized>(rng: &mut R) -> Board {
    fair_layout_with_attempts(rng, MAX_FAIR_ATTEMPTS)
}

/// [`fair_layout`] with an explicit attempt budget.
#[instrument(skip(rng))]
pub fn fair_layout_with_attempts<R: Rng + ?Sized>(rng: &mut R, attempts: usize) -> Board {
    for attempt in 1..=attempts {
        let board = random_layout(rng);
        if is_fair(&board) {
            debug!(attempt, layout = %board, "Generated fair layout");
            return board;
        }
    }

    warn!(
        attempts,
        "No fair layout found, falling back to any layout without a winner"
    );
    fallback_layout(rng)
}

/// First random layout in which neither side holds a winning line.
pub fn fallback_layout<R: Rng + ?Sized>(rng: &mut R) -> Board {
    loop {
        let board = random_layout(rng);
        if winner(&board).is_none() {
            return board;
        }
    }
}
