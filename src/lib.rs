//! Wordle Mini
//!
//! A level-based Wordle game core: scoring, a per-level session state
//! machine with coin-bought boosters, and persistent player progression.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_mini::core::{Feedback, Word};
//!
//! let guess = Word::new("alloy").unwrap();
//! let answer = Word::new("lolly").unwrap();
//!
//! let feedback = Feedback::calculate(&guess, &answer);
//! assert_eq!(feedback.count_correct(), 2);
//! ```

// Core domain types
pub mod core;

// Game session state machine and boosters
pub mod session;

// Player progression and persistence
pub mod progression;

// Session + progression orchestration
pub mod engine;

// Economy and persistence settings
pub mod config;

// Log file setup
pub mod logging;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
