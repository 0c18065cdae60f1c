//! Game session state machine
//!
//! One secret word, up to six guess rows and the booster effects applied to
//! them. A session starts `Playing` and ends `Won` or `Lost`; nothing leaves
//! a terminal state.

pub mod boosters;
mod game;

pub use boosters::{Booster, BoosterEffect};
pub use game::{GameSession, Row, SessionSnapshot};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of guess rows per session
pub const MAX_ROWS: usize = 6;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Rejections reported by session operations
///
/// None of these change session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Guess must be exactly 5 letters, got {0}")]
    InvalidLength(usize),
    #[error("'{0}' is not in the word list")]
    NotADictionaryWord(String),
    #[error("The game is already over")]
    GameOver,
    #[error("The current row is full")]
    RowFull,
    #[error("Letter '{0}' has been eliminated")]
    LetterEliminated(char),
    #[error("'{0}' is not a letter")]
    InvalidLetter(char),
    #[error("Column {} is locked to '{letter}'", .column + 1)]
    LockedColumn { column: usize, letter: char },
    #[error("Nothing to erase")]
    NothingToErase,
    #[error("Every column is already revealed")]
    NoHintAvailable,
    #[error("No letters left to eliminate")]
    NoLettersToEliminate,
    #[error("The game is still in progress")]
    StillPlaying,
    #[error("This game has already been recorded")]
    AlreadyReported,
}

/// Summary of a finished session, handed to the progression store once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    /// Level the session was played at
    pub level: u32,
    pub won: bool,
    /// Won through the skip booster (pays no coins)
    pub skipped: bool,
    /// Zero-based index of the winning or losing row
    pub row: usize,
}

impl GameOutcome {
    /// Rows used, counting the final one
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.row + 1
    }
}
