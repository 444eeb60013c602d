//! Movement rules: which cells a piece may slide to.
//!
//! The canonical rule is a one-step king move on the 3x3 grid, minus the
//! four edge-to-edge diagonals in both directions. At runtime the rule is
//! read from a precomputed neighbor table; the tests pin the table to the
//! rule for every ordered pair of cells.

use super::super::{Board, Move, Player, Position};
use tracing::instrument;

use Position::*;

/// Directed edge-to-edge steps the king metric would allow but the game
/// forbids: (1,3),(3,1),(3,7),(7,3),(7,5),(5,7),(5,1),(1,5).
pub const EXCLUDED_PAIRS: [(Position, Position); 8] = [
    (TopCenter, MiddleLeft),
    (MiddleLeft, TopCenter),
    (MiddleLeft, BottomCenter),
    (BottomCenter, MiddleLeft),
    (BottomCenter, MiddleRight),
    (MiddleRight, BottomCenter),
    (MiddleRight, TopCenter),
    (TopCenter, MiddleRight),
];

/// Neighbors of each cell in ascending order. The center reaches every
/// other cell; every ring cell reaches the center and its two ring
/// neighbors.
const NEIGHBORS: [&[Position]; 9] = [
    &[TopCenter, MiddleLeft, Center],
    &[TopLeft, TopRight, Center],
    &[TopCenter, Center, MiddleRight],
    &[TopLeft, Center, BottomLeft],
    &[
        TopLeft,
        TopCenter,
        TopRight,
        MiddleLeft,
        MiddleRight,
        BottomLeft,
        BottomCenter,
        BottomRight,
    ],
    &[TopRight, Center, BottomRight],
    &[MiddleLeft, Center, BottomCenter],
    &[Center, BottomLeft, BottomRight],
    &[Center, MiddleRight, BottomCenter],
];

/// Cells reachable from `from` in one step on an empty board, ascending.
pub fn neighbors(from: Position) -> &'static [Position] {
    NEIGHBORS[from.to_index()]
}

/// One-step king move on the grid.
fn is_king_step(from: Position, to: Position) -> bool {
    let row_diff = from.row().abs_diff(to.row());
    let col_diff = from.col().abs_diff(to.col());
    row_diff <= 1 && col_diff <= 1 && row_diff + col_diff > 0
}

/// Canonical movement rule, ignoring occupancy.
pub fn is_legal_step(from: Position, to: Position) -> bool {
    is_king_step(from, to) && !EXCLUDED_PAIRS.contains(&(from, to))
}

/// Empty cells the piece on `from` may slide to, ascending.
///
/// Occupancy of `from` itself is not checked.
#[instrument(skip(board), fields(board = %board))]
pub fn legal_destinations(board: &Board, from: Position) -> Vec<Position> {
    neighbors(from)
        .iter()
        .copied()
        .filter(|&to| board.is_empty(to))
        .collect()
}

/// Every legal move for `player`, ordered by source then destination.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    Position::ALL
        .iter()
        .copied()
        .filter(|&from| board.owner(from) == Some(player))
        .flat_map(|from| {
            neighbors(from)
                .iter()
                .copied()
                .filter(|&to| board.is_empty(to))
                .map(move |to| Move { from, to, player })
        })
        .collect()
}

/// Whether `player` has at least one legal move.
pub fn has_legal_move(board: &Board, player: Player) -> bool {
    Position::ALL
        .iter()
        .filter(|&&from| board.owner(from) == Some(player))
        .any(|&from| neighbors(from).iter().any(|&to| board.is_empty(to)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_canonical_rule() {
        for from in Position::ALL {
            for to in Position::ALL {
                assert_eq!(
                    neighbors(from).contains(&to),
                    is_legal_step(from, to),
                    "table and rule disagree on {:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_neighbors_sorted() {
        for from in Position::ALL {
            let list = neighbors(from);
            assert!(list.windows(2).all(|w| w[0] < w[1]), "{:?} not sorted", from);
        }
    }

    #[test]
    fn test_excluded_pairs_never_legal() {
        let board = Board::new();
        for (from, to) in EXCLUDED_PAIRS {
            assert!(is_king_step(from, to));
            assert!(!legal_destinations(&board, from).contains(&to));
        }
    }

    #[test]
    fn test_center_reaches_everything_on_empty_board() {
        let board = Board::new();
        assert_eq!(legal_destinations(&board, Center).len(), 8);
        assert_eq!(
            legal_destinations(&board, TopCenter),
            vec![TopLeft, TopRight, Center]
        );
        assert_eq!(
            legal_destinations(&board, BottomRight),
            vec![Center, MiddleRight, BottomCenter]
        );
    }

    #[test]
    fn test_destinations_skip_occupied() {
        let board = Board::with_pieces(&[TopLeft, Center], &[TopCenter]);
        assert_eq!(legal_destinations(&board, TopLeft), vec![MiddleLeft]);
    }

    #[test]
    fn test_legal_moves_order() {
        let board: Board = "B.B.W....".parse().unwrap();
        let moves: Vec<(usize, usize)> = legal_moves(&board, Player::Black)
            .iter()
            .map(|m| (m.from.to_index(), m.to.to_index()))
            .collect();
        assert_eq!(moves, vec![(0, 1), (0, 3), (2, 1), (2, 5)]);
    }

    #[test]
    fn test_has_legal_move_detects_blockade() {
        let board = Board::with_pieces(&[TopLeft], &[TopCenter, MiddleLeft, Center]);
        assert!(!has_legal_move(&board, Player::Black));
        assert!(has_legal_move(&board, Player::White));
        assert!(legal_moves(&board, Player::Black).is_empty());
    }
}
