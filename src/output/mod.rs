//! Terminal output formatting
//!
//! Colored rendering for line mode and the `stats` and `history` reports.

pub mod display;
pub mod formatters;

pub use display::{print_board, print_completion, print_history, print_stats};
