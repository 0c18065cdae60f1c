//! Word lists for Wordle Mini
//!
//! Provides embedded word lists compiled into the binary and the
//! `Dictionary` service built on top of them.

mod dictionary;
mod embedded;
pub mod loader;

pub use dictionary::{Dictionary, WordList};
pub use embedded::{ALLOWED_EXTRA, ALLOWED_EXTRA_COUNT, ANSWERS, ANSWERS_COUNT};
