//! Dictionary service
//!
//! Supplies secret words and answers word-validity queries for sessions.

use super::loader::words_from_slice;
use super::{ALLOWED_EXTRA, ANSWERS};
use crate::core::Word;
use rand::Rng;
use rand::prelude::IndexedRandom;
use rustc_hash::FxHashSet;

/// Source of secret words and judge of guess validity
pub trait Dictionary {
    /// Pick a secret word uniformly at random
    ///
    /// Returns `None` if the dictionary has no answer words.
    fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Word>;

    /// Whether `word` is accepted as a guess
    fn is_valid(&self, word: &Word) -> bool;
}

/// In-memory word list: answer pool plus accepted guesses
#[derive(Debug, Clone)]
pub struct WordList {
    answers: Vec<Word>,
    allowed: FxHashSet<Word>,
}

impl WordList {
    /// Build a word list; every answer is also an accepted guess
    #[must_use]
    pub fn new(answers: Vec<Word>, extra_guesses: impl IntoIterator<Item = Word>) -> Self {
        let mut allowed: FxHashSet<Word> = answers.iter().cloned().collect();
        allowed.extend(extra_guesses);
        Self { answers, allowed }
    }

    /// The word lists compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(words_from_slice(ANSWERS), words_from_slice(ALLOWED_EXTRA))
    }

    #[must_use]
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn allowed_count(&self) -> usize {
        self.allowed.len()
    }
}

impl Dictionary for WordList {
    fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Word> {
        self.answers.choose(rng).cloned()
    }

    fn is_valid(&self, word: &Word) -> bool {
        self.allowed.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn embedded_list_accepts_answers_and_extras() {
        let list = WordList::embedded();
        assert!(list.is_valid(&word("CRANE")));
        assert!(list.is_valid(&word("ALLOY")));
        assert!(list.is_valid(&word("LOLLY")));
        assert!(!list.is_valid(&word("XQZVW")));
        assert!(list.allowed_count() > list.answer_count());
    }

    #[test]
    fn random_word_comes_from_answers() {
        let list = WordList::new(vec![word("CRANE"), word("SLATE")], [word("LOLLY")]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let secret = list.random_word(&mut rng).unwrap();
            assert!(secret == word("CRANE") || secret == word("SLATE"));
        }
    }

    #[test]
    fn random_word_is_deterministic_for_seed() {
        let list = WordList::embedded();
        let a = list.random_word(&mut StdRng::seed_from_u64(42));
        let b = list.random_word(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_list_has_no_random_word() {
        let list = WordList::new(Vec::new(), []);
        assert!(list.random_word(&mut StdRng::seed_from_u64(1)).is_none());
    }
}
