//! Progression store
//!
//! Owns the player's `ProgressionState` and writes it through to storage
//! after every change.

use super::state::ProgressionState;
use super::storage::{Storage, StorageError};
use crate::config::GameConfig;
use crate::session::GameOutcome;
use std::thread;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Store failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Persistence failure: {0}")]
    Persistence(#[from] StorageError),
}

/// Player progression with write-through persistence
///
/// When a save fails after all retries the in-memory change is kept and the
/// store is marked dirty until [`ProgressionStore::flush`] succeeds.
#[derive(Debug)]
pub struct ProgressionStore<S: Storage> {
    state: ProgressionState,
    storage: S,
    config: GameConfig,
    dirty: bool,
}

impl<S: Storage> ProgressionStore<S> {
    /// Load state from `storage`, starting fresh if nothing is stored
    ///
    /// # Errors
    /// Returns `StoreError::Persistence` if the stored state cannot be read.
    pub fn load(mut storage: S, config: GameConfig) -> Result<Self, StoreError> {
        let state = match storage.load()? {
            Some(state) => {
                debug!(level = state.current_level, coins = state.coins, "loaded progression");
                state
            }
            None => {
                info!("no saved progression, starting fresh");
                ProgressionState::fresh(&config)
            }
        };

        Ok(Self {
            state,
            storage,
            config,
            dirty: false,
        })
    }

    /// Read-only view of the current state
    #[must_use]
    pub const fn state(&self) -> &ProgressionState {
        &self.state
    }

    #[must_use]
    pub const fn coins(&self) -> u32 {
        self.state.coins
    }

    #[must_use]
    pub const fn current_level(&self) -> u32 {
        self.state.current_level
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Whether in-memory state is ahead of storage
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record a finished game and return the coins it earned
    ///
    /// # Errors
    /// Returns `StoreError::Persistence` if the save fails; the game is still
    /// recorded in memory.
    pub fn complete_game(
        &mut self,
        outcome: &GameOutcome,
        elapsed_ms: u64,
    ) -> Result<u32, StoreError> {
        let coins_earned = self.state.record_outcome(outcome, elapsed_ms, &self.config);
        info!(
            level = outcome.level,
            won = outcome.won,
            skipped = outcome.skipped,
            attempts = outcome.attempts(),
            elapsed_ms,
            coins_earned,
            "game completed"
        );

        self.persist()?;
        Ok(coins_earned)
    }

    /// Deduct `cost` coins if the balance allows it
    ///
    /// Returns `false` without touching anything when coins are short.
    ///
    /// # Errors
    /// Returns `StoreError::Persistence` if the save fails after deducting.
    pub fn use_booster(&mut self, cost: u32) -> Result<bool, StoreError> {
        if !self.state.spend(cost) {
            debug!(cost, coins = self.state.coins, "booster refused: insufficient coins");
            return Ok(false);
        }

        debug!(cost, coins = self.state.coins, "booster paid");
        self.persist()?;
        Ok(true)
    }

    /// Retry writing state that failed to save earlier
    ///
    /// # Errors
    /// Returns `StoreError::Persistence` if the save fails again.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        if self.dirty {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let policy = self.config.save_retry;
        let attempts = policy.attempts.max(1);
        let mut backoff = policy.initial_backoff;

        let mut attempt = 1;
        loop {
            match self.storage.save(&self.state) {
                Ok(()) => {
                    self.dirty = false;
                    return Ok(());
                }
                Err(err) if attempt < attempts => {
                    warn!(attempt, error = %err, "saving progression failed, retrying");
                    if !backoff.is_zero() {
                        thread::sleep(backoff);
                    }
                    backoff = backoff.saturating_mul(2);
                    attempt += 1;
                }
                Err(err) => {
                    warn!(attempt, error = %err, "saving progression failed, giving up");
                    self.dirty = true;
                    return Err(err.into());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::progression::MemoryStorage;

    fn config() -> GameConfig {
        GameConfig {
            save_retry: RetryPolicy {
                attempts: 3,
                initial_backoff: std::time::Duration::ZERO,
            },
            ..GameConfig::default()
        }
    }

    fn store() -> ProgressionStore<MemoryStorage> {
        ProgressionStore::load(MemoryStorage::new(), config()).unwrap()
    }

    fn win(level: u32, row: usize) -> GameOutcome {
        GameOutcome {
            level,
            won: true,
            skipped: false,
            row,
        }
    }

    #[test]
    fn empty_storage_starts_fresh() {
        let store = store();
        assert_eq!(store.coins(), 100);
        assert_eq!(store.current_level(), 1);
        assert!(!store.is_dirty());
        assert_eq!(store.storage().save_count(), 0);
    }

    #[test]
    fn loads_existing_state() {
        let saved = ProgressionState {
            coins: 7,
            current_level: 9,
            ..ProgressionState::default()
        };
        let store = ProgressionStore::load(MemoryStorage::with_state(saved), config()).unwrap();
        assert_eq!(store.coins(), 7);
        assert_eq!(store.current_level(), 9);
    }

    #[test]
    fn win_on_third_row_pays_thirty() {
        let mut store = store();
        let coins = store.complete_game(&win(1, 2), 45_000).unwrap();

        assert_eq!(coins, 30);
        assert_eq!(store.coins(), 130);
        assert!(store.state().max_score >= 80);
        assert_eq!(store.current_level(), 2);
        assert_eq!(store.storage().stored(), Some(store.state()));
    }

    #[test]
    fn skip_pays_nothing() {
        for row in 0..6 {
            let mut store = store();
            let outcome = GameOutcome {
                skipped: true,
                ..win(1, row)
            };
            assert_eq!(store.complete_game(&outcome, 10_000).unwrap(), 0);
            assert_eq!(store.coins(), 100);
            assert_eq!(store.current_level(), 2);
        }
    }

    #[test]
    fn loss_keeps_level_and_coins() {
        let mut store = store();
        let outcome = GameOutcome {
            won: false,
            ..win(1, 5)
        };
        assert_eq!(store.complete_game(&outcome, 80_000).unwrap(), 0);
        assert_eq!(store.coins(), 100);
        assert_eq!(store.current_level(), 1);
        assert_eq!(store.state().game_history.len(), 1);
        assert_eq!(store.storage().save_count(), 1);
    }

    #[test]
    fn booster_with_exact_balance_succeeds() {
        let saved = ProgressionState {
            coins: 25,
            ..ProgressionState::default()
        };
        let mut store = ProgressionStore::load(MemoryStorage::with_state(saved), config()).unwrap();

        assert!(store.use_booster(25).unwrap());
        assert_eq!(store.coins(), 0);
        assert_eq!(store.storage().stored().map(|s| s.coins), Some(0));
    }

    #[test]
    fn booster_one_short_fails_without_saving() {
        let saved = ProgressionState {
            coins: 24,
            ..ProgressionState::default()
        };
        let mut store = ProgressionStore::load(MemoryStorage::with_state(saved), config()).unwrap();

        assert!(!store.use_booster(25).unwrap());
        assert_eq!(store.coins(), 24);
        assert_eq!(store.storage().save_count(), 0);
    }

    #[test]
    fn history_is_capped_most_recent_first() {
        let mut store = store();
        for level in 1..=60 {
            store.complete_game(&win(level, 0), 1_000).unwrap();
        }

        let history = &store.state().game_history;
        assert_eq!(history.len(), 50);
        assert_eq!(history[0].level, 60);
        assert_eq!(history[49].level, 11);
    }

    #[test]
    fn transient_save_failure_is_retried() {
        let mut store = store();
        store.storage_mut().fail_next_saves(2);

        assert!(store.use_booster(15).unwrap());
        assert!(!store.is_dirty());
        assert_eq!(store.storage().stored().map(|s| s.coins), Some(85));
    }

    #[test]
    fn persistent_save_failure_surfaces_and_marks_dirty() {
        let mut store = store();
        store.storage_mut().fail_next_saves(3);

        let result = store.complete_game(&win(1, 0), 5_000);
        assert!(matches!(result, Err(StoreError::Persistence(_))));
        assert!(store.is_dirty());
        assert_eq!(store.coins(), 150);
        assert!(store.storage().stored().is_none());

        store.flush().unwrap();
        assert!(!store.is_dirty());
        assert_eq!(store.storage().stored().map(|s| s.coins), Some(150));
    }

    #[test]
    fn flush_when_clean_does_not_write() {
        let mut store = store();
        store.flush().unwrap();
        assert_eq!(store.storage().save_count(), 0);
    }
}
