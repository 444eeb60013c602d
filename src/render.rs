//! Plain-text views of a match for the terminal.

use strictly_crossline::{HistoryEntry, MatchState, Move, Score};

/// Board grid followed by whose turn it is (or who won).
pub fn board(state: &MatchState) -> String {
    let status = match state.winner() {
        Some(winner) => format!("{} wins!", winner),
        None => format!("{} to move", state.current_player()),
    };
    format!("\n{}\n\n{}", state.board().display(), status)
}

/// Legal moves as 1-based `from → to` pairs.
pub fn legal_moves(moves: &[Move]) -> String {
    if moves.is_empty() {
        return "No legal moves".to_string();
    }
    let list = moves
        .iter()
        .map(|m| format!("{} → {}", m.from.number(), m.to.number()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Legal moves: {}", list)
}

/// Numbered move list with `HH:MM:SS` stamps, oldest first.
pub fn history(entries: &[HistoryEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{:>3}. {}", i + 1, entry))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cumulative score line.
pub fn score(score: &Score) -> String {
    format!("Score: {}", score)
}
