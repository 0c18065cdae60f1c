//! `stats` command: progression summary

use crate::output::print_stats;
use crate::progression::{ProgressionState, ProgressionStore, Storage};

/// Headline numbers shown by `stats`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    pub coins: u32,
    pub current_level: u32,
    pub max_level: u32,
    pub max_score: u32,
    pub max_time_ms: u64,
    pub games_played: usize,
    pub games_won: usize,
}

impl StatsSummary {
    #[must_use]
    pub fn from_state(state: &ProgressionState) -> Self {
        Self {
            coins: state.coins,
            current_level: state.current_level,
            max_level: state.max_level,
            max_score: state.max_score,
            max_time_ms: state.max_time_ms,
            games_played: state.games_played(),
            games_won: state.games_won(),
        }
    }
}

/// Print the player's progression
pub fn run_stats<S: Storage>(store: &ProgressionStore<S>) -> StatsSummary {
    print_stats(store.state());
    StatsSummary::from_state(store.state())
}
