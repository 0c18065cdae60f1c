//! Keyboard letter status
//!
//! Tracks the best verdict observed for each letter across a session's
//! submitted guesses.

use super::word::WORD_LENGTH;
use super::{LetterVerdict, Word};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Best verdict seen per letter (`Correct > Present > Absent > unset`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyboardStatus(FxHashMap<char, LetterVerdict>);

impl KeyboardStatus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of an uppercase letter, `None` if never guessed
    #[must_use]
    pub fn get(&self, letter: char) -> Option<LetterVerdict> {
        self.0.get(&letter).copied()
    }

    /// Merge a scored guess into the status map
    ///
    /// Returns a new map; a letter is only ever upgraded, never downgraded.
    #[must_use]
    pub fn merge(&self, guess: &Word, verdicts: &[LetterVerdict; WORD_LENGTH]) -> Self {
        let mut merged = self.0.clone();
        for (&letter, &verdict) in guess.chars().iter().zip(verdicts) {
            merged
                .entry(char::from(letter))
                .and_modify(|best| *best = (*best).max(verdict))
                .or_insert(verdict);
        }
        Self(merged)
    }

    /// Letters with a known status, sorted alphabetically
    #[must_use]
    pub fn letters(&self) -> Vec<(char, LetterVerdict)> {
        let mut letters: Vec<_> = self.0.iter().map(|(&c, &v)| (c, v)).collect();
        letters.sort_unstable_by_key(|&(c, _)| c);
        letters
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
