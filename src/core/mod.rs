//! Core domain types for Wordle
//!
//! Words, per-letter verdicts and keyboard status. Everything here is pure:
//! no randomness, no I/O.

mod keyboard;
mod verdict;
mod word;

pub use keyboard::KeyboardStatus;
pub use verdict::{Feedback, LetterVerdict, score_guess};
pub use word::{WORD_LENGTH, Word, WordError};
