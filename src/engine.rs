//! Game engine
//!
//! Wires the dictionary, sessions and the progression store together. Every
//! operation that touches both a session and the coin balance goes through
//! here so the ordering rules hold:
//!
//! - boosters: eligibility check, then charge, then effect
//! - completion: a session's outcome is rewarded at most once

use crate::core::Feedback;
use crate::progression::{ProgressionStore, Storage, StoreError};
use crate::session::{Booster, BoosterEffect, GameSession, SessionError};
use crate::wordlists::Dictionary;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{debug, info};

/// Failures surfaced to the UI layer
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Not enough coins: {booster} costs {cost}, you have {available}")]
    InsufficientCoins {
        booster: Booster,
        cost: u32,
        available: u32,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("The dictionary has no answer words")]
    EmptyDictionary,
}

/// Result of recording a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub coins_earned: u32,
    /// Balance after the reward
    pub coins: u32,
    /// Level the next session will be played at
    pub next_level: u32,
}

/// Owns the long-lived collaborators of a play session
#[derive(Debug)]
pub struct Engine<D: Dictionary, S: Storage> {
    dictionary: D,
    store: ProgressionStore<S>,
    rng: StdRng,
}

impl<D: Dictionary, S: Storage> Engine<D, S> {
    /// Create an engine; `seed` makes secrets and boosters reproducible
    pub fn new(dictionary: D, store: ProgressionStore<S>, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            dictionary,
            store,
            rng,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &ProgressionStore<S> {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut ProgressionStore<S> {
        &mut self.store
    }

    #[must_use]
    pub const fn dictionary(&self) -> &D {
        &self.dictionary
    }

    /// Start a session at the player's current level
    ///
    /// # Errors
    /// `EmptyDictionary` if no secret word can be drawn.
    pub fn start_session(&mut self) -> Result<GameSession, EngineError> {
        let secret = self
            .dictionary
            .random_word(&mut self.rng)
            .ok_or(EngineError::EmptyDictionary)?;
        let level = self.store.current_level();

        info!(level, "session started");
        debug!(secret = %secret, "secret drawn");
        Ok(GameSession::new(secret, level))
    }

    /// Submit the session's current row against the dictionary
    ///
    /// # Errors
    /// Any `SessionError` from [`GameSession::submit_guess`].
    pub fn submit(&self, session: &mut GameSession) -> Result<Feedback, EngineError> {
        let feedback = session.submit_guess(&self.dictionary)?;
        debug!(
            row = session.rows().len() - 1,
            feedback = %feedback.to_emoji(),
            "guess submitted"
        );
        Ok(feedback)
    }

    /// Buy and apply a booster
    ///
    /// Nothing is charged unless the booster can take effect.
    ///
    /// # Errors
    /// - `Session` if the booster is not applicable (game over, no hint column, ...)
    /// - `InsufficientCoins` if the balance is below the cost
    /// - `Store` if the charge could not be saved; the effect is still applied
    pub fn use_booster(
        &mut self,
        session: &mut GameSession,
        booster: Booster,
    ) -> Result<BoosterEffect, EngineError> {
        session.check_booster(booster)?;

        let cost = booster.cost(&self.store.config().booster_costs);
        let available = self.store.coins();
        let charged = self.store.use_booster(cost);
        if matches!(charged, Ok(false)) {
            return Err(EngineError::InsufficientCoins {
                booster,
                cost,
                available,
            });
        }

        // A failed save leaves the coins spent in memory, so the effect is
        // applied before the error is reported.
        let effect = session.apply_booster(booster, &mut self.rng)?;
        info!(%booster, cost, coins = self.store.coins(), ?effect, "booster used");
        charged?;
        Ok(effect)
    }

    /// Reward a finished session, using its wall-clock play time
    ///
    /// # Errors
    /// See [`Engine::complete_with_elapsed`].
    pub fn complete(&mut self, session: &mut GameSession) -> Result<Completion, EngineError> {
        let elapsed_ms = u64::try_from(session.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.complete_with_elapsed(session, elapsed_ms)
    }

    /// Reward a finished session
    ///
    /// # Errors
    /// - `Session(StillPlaying)` before the session ends
    /// - `Session(AlreadyReported)` if it was already rewarded
    /// - `Store` if the result could not be saved (it is kept in memory)
    pub fn complete_with_elapsed(
        &mut self,
        session: &mut GameSession,
        elapsed_ms: u64,
    ) -> Result<Completion, EngineError> {
        let outcome = session.take_outcome()?;
        let coins_earned = self.store.complete_game(&outcome, elapsed_ms)?;

        Ok(Completion {
            coins_earned,
            coins: self.store.coins(),
            next_level: self.store.current_level(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, RetryPolicy};
    use crate::core::Word;
    use crate::progression::{MemoryStorage, ProgressionState};
    use crate::session::GameStatus;
    use crate::wordlists::WordList;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn engine_with_coins(coins: u32) -> Engine<WordList, MemoryStorage> {
        let dictionary = WordList::new(
            vec![word("CRANE")],
            ["SLATE", "TRACE", "PILOT", "BRINE", "RATES", "GRACE"].map(word),
        );
        let config = GameConfig {
            save_retry: RetryPolicy::none(),
            ..GameConfig::default()
        };
        let storage = MemoryStorage::with_state(ProgressionState {
            coins,
            ..ProgressionState::default()
        });
        let store = ProgressionStore::load(storage, config).unwrap();
        Engine::new(dictionary, store, Some(1))
    }

    fn play(engine: &Engine<WordList, MemoryStorage>, session: &mut GameSession, text: &str) {
        while session.backspace().is_ok() {}
        for letter in text.chars() {
            session.append_letter(letter).unwrap();
        }
        engine.submit(session).unwrap();
    }

    #[test]
    fn session_uses_current_level() {
        let mut engine = engine_with_coins(100);
        let session = engine.start_session().unwrap();
        assert_eq!(session.level(), 1);
        assert_eq!(session.secret(), &word("CRANE"));
    }

    #[test]
    fn empty_dictionary_is_reported() {
        let store = ProgressionStore::load(MemoryStorage::new(), GameConfig::default()).unwrap();
        let mut engine = Engine::new(WordList::new(Vec::new(), []), store, Some(0));
        assert!(matches!(
            engine.start_session(),
            Err(EngineError::EmptyDictionary)
        ));
    }

    #[test]
    fn crane_on_third_row_pays_thirty() {
        let mut engine = engine_with_coins(100);
        let mut session = engine.start_session().unwrap();
        play(&engine, &mut session, "SLATE");
        play(&engine, &mut session, "TRACE");
        play(&engine, &mut session, "CRANE");
        assert_eq!(session.status(), GameStatus::Won);

        let completion = engine.complete_with_elapsed(&mut session, 60_000).unwrap();
        assert_eq!(completion.coins_earned, 30);
        assert_eq!(completion.coins, 130);
        assert_eq!(completion.next_level, 2);
        assert!(engine.store().state().max_score >= 80);
    }

    #[test]
    fn session_is_rewarded_once() {
        let mut engine = engine_with_coins(100);
        let mut session = engine.start_session().unwrap();
        play(&engine, &mut session, "CRANE");

        engine.complete_with_elapsed(&mut session, 1_000).unwrap();
        let again = engine.complete_with_elapsed(&mut session, 1_000);

        assert!(matches!(
            again,
            Err(EngineError::Session(SessionError::AlreadyReported))
        ));
        assert_eq!(engine.store().coins(), 150);
        assert_eq!(engine.store().state().game_history.len(), 1);
    }

    #[test]
    fn completing_unfinished_session_fails() {
        let mut engine = engine_with_coins(100);
        let mut session = engine.start_session().unwrap();
        assert!(matches!(
            engine.complete(&mut session),
            Err(EngineError::Session(SessionError::StillPlaying))
        ));
    }

    #[test]
    fn skip_wins_without_reward() {
        let mut engine = engine_with_coins(100);
        let mut session = engine.start_session().unwrap();
        play(&engine, &mut session, "SLATE");

        let effect = engine.use_booster(&mut session, Booster::Skip).unwrap();
        assert_eq!(effect, BoosterEffect::Skipped);
        assert_eq!(engine.store().coins(), 50);

        let completion = engine.complete_with_elapsed(&mut session, 5_000).unwrap();
        assert_eq!(completion.coins_earned, 0);
        assert_eq!(completion.coins, 50);
        assert_eq!(completion.next_level, 2);
    }

    #[test]
    fn insufficient_coins_leaves_session_untouched() {
        let mut engine = engine_with_coins(24);
        let mut session = engine.start_session().unwrap();
        let before = session.snapshot();

        let result = engine.use_booster(&mut session, Booster::Hint);
        assert!(matches!(
            result,
            Err(EngineError::InsufficientCoins {
                cost: 25,
                available: 24,
                ..
            })
        ));
        assert_eq!(session.snapshot(), before);
        assert_eq!(engine.store().coins(), 24);
    }

    #[test]
    fn exact_balance_buys_booster() {
        let mut engine = engine_with_coins(15);
        let mut session = engine.start_session().unwrap();

        let effect = engine.use_booster(&mut session, Booster::Dart).unwrap();
        let BoosterEffect::Eliminated(letters) = effect else {
            panic!("dart should eliminate letters");
        };
        assert_eq!(letters.len(), 3);
        assert!(letters.iter().all(|&c| !session.secret().has_letter(c as u8)));
        assert_eq!(engine.store().coins(), 0);
    }

    #[test]
    fn hint_without_column_is_not_charged() {
        let mut engine = engine_with_coins(200);
        let mut session = engine.start_session().unwrap();
        for _ in 0..5 {
            engine.use_booster(&mut session, Booster::Hint).unwrap();
        }
        let coins = engine.store().coins();
        assert_eq!(coins, 200 - 5 * 25);

        let result = engine.use_booster(&mut session, Booster::Hint);
        assert!(matches!(
            result,
            Err(EngineError::Session(SessionError::NoHintAvailable))
        ));
        assert_eq!(engine.store().coins(), coins);
    }

    #[test]
    fn booster_after_game_over_is_not_charged() {
        let mut engine = engine_with_coins(100);
        let mut session = engine.start_session().unwrap();
        play(&engine, &mut session, "CRANE");

        for booster in Booster::ALL {
            assert!(matches!(
                engine.use_booster(&mut session, booster),
                Err(EngineError::Session(SessionError::GameOver))
            ));
        }
        assert_eq!(engine.store().coins(), 100);
    }

    #[test]
    fn failed_charge_save_still_applies_effect() {
        let mut engine = engine_with_coins(100);
        let mut session = engine.start_session().unwrap();
        engine.store_mut().storage_mut().fail_next_saves(1);

        let result = engine.use_booster(&mut session, Booster::Hint);
        assert!(matches!(result, Err(EngineError::Store(_))));
        assert_eq!(session.snapshot().locked.len(), 1);
        assert_eq!(engine.store().coins(), 75);
        assert!(engine.store().is_dirty());
    }

    #[test]
    fn loss_is_recorded_without_reward() {
        let mut engine = engine_with_coins(100);
        let mut session = engine.start_session().unwrap();
        for text in ["SLATE", "TRACE", "PILOT", "BRINE", "RATES", "GRACE"] {
            play(&engine, &mut session, text);
        }
        assert_eq!(session.status(), GameStatus::Lost);

        let completion = engine.complete_with_elapsed(&mut session, 90_000).unwrap();
        assert_eq!(completion.coins_earned, 0);
        assert_eq!(completion.next_level, 1);
        let record = &engine.store().state().game_history[0];
        assert!(!record.won);
        assert_eq!(record.attempts, 6);
    }
}
