//! Player progression
//!
//! Coins, best records, current level and game history, persisted through
//! an injected `Storage` backend.

mod state;
mod storage;
mod store;

pub use state::{GameRecord, ProgressionState, coins_for, score_for_row};
pub use storage::{JsonFileStorage, MemoryStorage, SAVE_VERSION, Storage, StorageError};
pub use store::{ProgressionStore, StoreError};
