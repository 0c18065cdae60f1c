//! Persisted player progression
//!
//! The record fields only move forward on wins; every finished game, won or
//! lost, lands in the history.

use crate::config::GameConfig;
use crate::session::GameOutcome;
use serde::{Deserialize, Serialize};

/// Summary of one completed game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub level: u32,
    pub won: bool,
    #[serde(default)]
    pub skipped: bool,
    /// Rows used, including the final one
    pub attempts: u32,
    pub elapsed_ms: u64,
    pub score: u32,
    pub coins_earned: u32,
}

/// Cross-session player state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionState {
    pub coins: u32,
    pub max_level: u32,
    pub max_score: u32,
    /// Fastest winning time in milliseconds, 0 while unset
    pub max_time_ms: u64,
    pub current_level: u32,
    /// Most recent first
    pub game_history: Vec<GameRecord>,
}

/// Score for a win on `row` (zero-based): 100, 90, 80, ...
#[must_use]
pub fn score_for_row(row: usize) -> u32 {
    let penalty = u32::try_from(row).unwrap_or(u32::MAX).saturating_mul(10);
    100u32.saturating_sub(penalty)
}

/// Coins paid for an outcome: nothing for losses and skips
#[must_use]
pub fn coins_for(outcome: &GameOutcome, config: &GameConfig) -> u32 {
    if !outcome.won || outcome.skipped {
        return 0;
    }
    config.reward_for_row(outcome.row)
}

impl ProgressionState {
    /// State of a brand-new player
    #[must_use]
    pub fn fresh(config: &GameConfig) -> Self {
        Self {
            coins: config.starting_coins,
            max_level: config.starting_level,
            max_score: 0,
            max_time_ms: 0,
            current_level: config.starting_level,
            game_history: Vec::new(),
        }
    }

    /// Fold a finished game into the state, returning the coins earned
    pub fn record_outcome(
        &mut self,
        outcome: &GameOutcome,
        elapsed_ms: u64,
        config: &GameConfig,
    ) -> u32 {
        let coins_earned = coins_for(outcome, config);
        let score = if outcome.won {
            score_for_row(outcome.row)
        } else {
            0
        };

        let record = GameRecord {
            level: outcome.level,
            won: outcome.won,
            skipped: outcome.skipped,
            attempts: u32::try_from(outcome.attempts()).unwrap_or(u32::MAX),
            elapsed_ms,
            score,
            coins_earned,
        };
        self.game_history.insert(0, record);
        self.game_history.truncate(config.history_limit);

        if outcome.won {
            self.coins = self.coins.saturating_add(coins_earned);
            self.max_level = self.max_level.max(outcome.level);
            self.max_score = self.max_score.max(score);
            self.max_time_ms = if self.max_time_ms == 0 {
                elapsed_ms
            } else {
                self.max_time_ms.min(elapsed_ms)
            };
            self.current_level = self.current_level.saturating_add(1);
        }

        coins_earned
    }

    /// Deduct `cost` if affordable
    pub fn spend(&mut self, cost: u32) -> bool {
        match self.coins.checked_sub(cost) {
            Some(remaining) => {
                self.coins = remaining;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn games_played(&self) -> usize {
        self.game_history.len()
    }

    #[must_use]
    pub fn games_won(&self) -> usize {
        self.game_history.iter().filter(|r| r.won).count()
    }
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::fresh(&GameConfig::default())
    }
}
