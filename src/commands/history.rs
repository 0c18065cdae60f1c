//! `history` command: recent games, newest first

use crate::output::print_history;
use crate::progression::{GameRecord, ProgressionState};

/// The `limit` most recent records
#[must_use]
pub fn recent_games(state: &ProgressionState, limit: usize) -> &[GameRecord] {
    let end = limit.min(state.game_history.len());
    &state.game_history[..end]
}

/// Print up to `limit` recent games
pub fn run_history(state: &ProgressionState, limit: usize) {
    print_history(recent_games(state, limit));
}
