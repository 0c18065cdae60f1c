//! Command implementations

pub mod history;
pub mod simple;
pub mod stats;

pub use history::{recent_games, run_history};
pub use simple::run_simple;
pub use stats::{StatsSummary, run_stats};
