//! Game configuration
//!
//! Economy constants and persistence tuning. The defaults are the shipped
//! game balance; the CLI only overrides paths and seeds.

use std::time::Duration;

/// Coins paid for a win, indexed by zero-based winning row
pub const DEFAULT_REWARD_TABLE: [u32; 6] = [50, 40, 30, 20, 15, 10];

/// Reward for a winning row outside the table
pub const FALLBACK_REWARD: u32 = 10;

/// Coin price of each booster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoosterCosts {
    pub dart: u32,
    pub hint: u32,
    pub skip: u32,
}

impl Default for BoosterCosts {
    fn default() -> Self {
        Self {
            dart: 15,
            hint: 25,
            skip: 50,
        }
    }
}

/// How persistence writes are retried before giving up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (at least 1)
    pub attempts: u32,
    /// Sleep before the second attempt; doubles after each failure
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    /// Single attempt, no sleeping
    #[must_use]
    pub const fn none() -> Self {
        Self {
            attempts: 1,
            initial_backoff: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            initial_backoff: Duration::from_millis(25),
        }
    }
}

/// Economy and persistence settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Coin balance of a fresh profile
    pub starting_coins: u32,
    /// Level of a fresh profile
    pub starting_level: u32,
    pub booster_costs: BoosterCosts,
    pub reward_table: [u32; 6],
    /// Completed games kept in history, most recent first
    pub history_limit: usize,
    pub save_retry: RetryPolicy,
}

impl GameConfig {
    /// Coins for a win on `row` (zero-based)
    #[must_use]
    pub fn reward_for_row(&self, row: usize) -> u32 {
        self.reward_table
            .get(row)
            .copied()
            .unwrap_or(FALLBACK_REWARD)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_coins: 100,
            starting_level: 1,
            booster_costs: BoosterCosts::default(),
            reward_table: DEFAULT_REWARD_TABLE,
            history_limit: 50,
            save_retry: RetryPolicy::default(),
        }
    }
}
