//! Tests for the rules engine through the crate's public API.

use crossline::{
    Board, GameResult, IllegalMoveReason, MatchState, Move, MoveError, Position, Side,
    apply_move, initialize, initialize_with_rng, is_winning_position, legal_destinations,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn scenario() -> MatchState {
    // Black on 0, 1, 2 and White on 3, 5, 7.
    initialize(Some(Board::with_pieces(
        &[Position::TopLeft, Position::TopCenter, Position::TopRight],
        &[Position::MiddleLeft, Position::MiddleRight, Position::BottomCenter],
    )))
}

#[test]
fn test_white_cannot_move_black_piece() {
    let mut state = scenario();
    let snapshot = state.clone();

    // White to move after Black's first move.
    state
        .apply_move(Move::new(Position::TopCenter, Position::Center, Side::Black))
        .unwrap();
    let before = state.clone();
    let err = state
        .apply_move(Move::new(Position::TopLeft, Position::TopCenter, Side::White))
        .unwrap_err();

    assert_eq!(
        err,
        MoveError::Illegal {
            action: Move::new(Position::TopLeft, Position::TopCenter, Side::White),
            reason: IllegalMoveReason::SourceNotOwned { owner: Side::Black },
        }
    );
    assert_eq!(state, before);

    // Out of turn entirely.
    let err = apply_move(
        &snapshot,
        Move::new(Position::MiddleLeft, Position::Center, Side::White),
    )
    .unwrap_err();
    assert!(matches!(err, MoveError::Illegal { .. }));
    assert!(err.to_string().starts_with("Invalid move"));
}

#[test]
fn test_won_layout_rejects_moves() {
    let board: Board = "B.W.BW.WB".parse().unwrap();
    assert!(is_winning_position(&board, Side::Black));

    let state = initialize(Some(board));
    let err = apply_move(
        &state,
        Move::new(Position::MiddleRight, Position::TopCenter, Side::White),
    )
    .unwrap_err();
    assert_eq!(err, MoveError::GameOver { winner: Side::Black });
}

#[test]
fn test_hundred_initializations_have_no_winner() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..100 {
        let state = initialize_with_rng(None, &mut rng);
        assert!(!is_winning_position(state.board(), Side::Black));
        assert!(!is_winning_position(state.board(), Side::White));
    }

    // The thread RNG path as well.
    for _ in 0..100 {
        let state = initialize(None);
        assert_eq!(state.result(), GameResult::InProgress);
    }
}

#[test]
fn test_legal_destinations_respect_exclusions() {
    let board = Board::new();
    // Cell 1 (0-based) never reaches 3 or 5.
    assert_eq!(
        legal_destinations(&board, Position::TopCenter),
        vec![Position::TopLeft, Position::TopRight, Position::Center]
    );
    assert_eq!(legal_destinations(&board, Position::Center).len(), 8);
}

#[test]
fn test_turns_alternate() {
    let board = Board::with_pieces(
        &[Position::TopLeft, Position::MiddleLeft, Position::BottomRight],
        &[Position::TopRight, Position::MiddleRight, Position::BottomCenter],
    );
    let mut state = initialize(Some(board));

    state
        .apply_move(Move::new(Position::MiddleLeft, Position::BottomLeft, Side::Black))
        .unwrap();
    assert_eq!(state.current_player(), Side::White);

    state
        .apply_move(Move::new(Position::BottomCenter, Position::Center, Side::White))
        .unwrap();
    assert_eq!(state.current_player(), Side::Black);

    assert_eq!(state.result(), GameResult::InProgress);
    assert_eq!(state.history().len(), 2);
    assert_eq!(state.history()[0].player, Side::Black);
    assert_eq!(state.history()[1].player, Side::White);
}

#[test]
fn test_state_round_trips_through_json() {
    let mut state = scenario();
    state
        .apply_move(Move::new(Position::TopCenter, Position::Center, Side::Black))
        .unwrap();
    let json = serde_json::to_string(&state).unwrap();
    let back: MatchState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}
