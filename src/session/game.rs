//! The live game session
//!
//! Owns the secret word, submitted rows, the row being typed and the
//! booster state (locked columns, eliminated letters).

use super::boosters::{
    Booster, BoosterEffect, dart_candidates, hint_candidates, pick_dart_letters, pick_hint_column,
};
use super::{GameOutcome, GameStatus, MAX_ROWS, SessionError};
use crate::core::{Feedback, KeyboardStatus, WORD_LENGTH, Word};
use crate::wordlists::Dictionary;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// A submitted guess and its frozen verdicts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub guess: Word,
    pub feedback: Feedback,
}

/// Everything a renderer needs, with no scoring left to derive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub level: u32,
    pub status: GameStatus,
    pub current_row: usize,
    pub rows: Vec<Row>,
    pub input: String,
    /// Typed letters merged with locked letters the cursor has not reached
    pub preview: [Option<char>; WORD_LENGTH],
    pub keyboard: KeyboardStatus,
    pub locked: Vec<usize>,
    pub eliminated: Vec<char>,
    pub skipped: bool,
    /// The secret word, only once the game is over
    pub answer: Option<Word>,
}

/// One level's game
#[derive(Debug, Clone)]
pub struct GameSession {
    secret: Word,
    level: u32,
    rows: Vec<Row>,
    current_row: usize,
    input: String,
    status: GameStatus,
    keyboard: KeyboardStatus,
    locked: BTreeSet<usize>,
    eliminated: BTreeSet<char>,
    skipped: bool,
    reported: bool,
    started_at: Instant,
}

impl GameSession {
    #[must_use]
    pub fn new(secret: Word, level: u32) -> Self {
        Self {
            secret,
            level,
            rows: Vec::with_capacity(MAX_ROWS),
            current_row: 0,
            input: String::with_capacity(WORD_LENGTH),
            status: GameStatus::Playing,
            keyboard: KeyboardStatus::new(),
            locked: BTreeSet::new(),
            eliminated: BTreeSet::new(),
            skipped: false,
            reported: false,
            started_at: Instant::now(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn secret(&self) -> &Word {
        &self.secret
    }

    #[inline]
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Index of the row being typed, or of the final row once over
    #[inline]
    #[must_use]
    pub const fn current_row(&self) -> usize {
        self.current_row
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub const fn keyboard(&self) -> &KeyboardStatus {
        &self.keyboard
    }

    #[must_use]
    pub fn is_locked(&self, column: usize) -> bool {
        self.locked.contains(&column)
    }

    #[must_use]
    pub fn is_eliminated(&self, letter: char) -> bool {
        self.eliminated.contains(&letter.to_ascii_uppercase())
    }

    #[must_use]
    pub const fn skipped(&self) -> bool {
        self.skipped
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Current row as it should be drawn
    #[must_use]
    pub fn preview(&self) -> [Option<char>; WORD_LENGTH] {
        let typed = self.input.as_bytes();
        std::array::from_fn(|column| match typed.get(column) {
            Some(&letter) => Some(char::from(letter)),
            None if self.locked.contains(&column) => Some(self.secret_letter(column)),
            None => None,
        })
    }

    /// Type one letter into the current row
    ///
    /// Locked columns at the cursor are filled first, so typing skips over them.
    ///
    /// # Errors
    /// `GameOver`, `InvalidLetter`, `RowFull` or `LetterEliminated`.
    pub fn append_letter(&mut self, letter: char) -> Result<(), SessionError> {
        self.ensure_playing()?;
        if !letter.is_ascii_alphabetic() {
            return Err(SessionError::InvalidLetter(letter));
        }
        let letter = letter.to_ascii_uppercase();
        if self.eliminated.contains(&letter) {
            return Err(SessionError::LetterEliminated(letter));
        }

        self.fill_locked();
        if self.input.len() >= WORD_LENGTH {
            return Err(SessionError::RowFull);
        }

        self.input.push(letter);
        self.fill_locked();
        Ok(())
    }

    /// Erase the last typed letter
    ///
    /// Locked letters are never erased: the right-most unlocked letter is
    /// removed along with any locked letters after it.
    ///
    /// # Errors
    /// `GameOver`, or `NothingToErase` when only locked letters remain.
    pub fn backspace(&mut self) -> Result<(), SessionError> {
        self.ensure_playing()?;
        let column = (0..self.input.len())
            .rev()
            .find(|column| !self.locked.contains(column))
            .ok_or(SessionError::NothingToErase)?;

        self.input.truncate(column);
        self.fill_locked();
        Ok(())
    }

    /// Submit the current row
    ///
    /// # Errors
    /// `GameOver`, `InvalidLength` if the row is not full, or
    /// `NotADictionaryWord` if the dictionary rejects it.
    pub fn submit_guess<D: Dictionary>(
        &mut self,
        dictionary: &D,
    ) -> Result<Feedback, SessionError> {
        self.ensure_playing()?;
        let length = self.input.len();
        if length != WORD_LENGTH {
            return Err(SessionError::InvalidLength(length));
        }

        let guess = Word::new(&self.input).map_err(|_| SessionError::InvalidLength(length))?;
        if !dictionary.is_valid(&guess) {
            return Err(SessionError::NotADictionaryWord(guess.to_string()));
        }

        let feedback = Feedback::calculate(&guess, &self.secret);
        self.record_row(guess, feedback);
        Ok(feedback)
    }

    /// Check a booster can take effect right now, without changing anything
    ///
    /// # Errors
    /// `GameOver`, `NoLettersToEliminate` (dart) or `NoHintAvailable` (hint).
    pub fn check_booster(&self, booster: Booster) -> Result<(), SessionError> {
        self.ensure_playing()?;
        match booster {
            Booster::Dart if dart_candidates(&self.secret, &self.eliminated).is_empty() => {
                Err(SessionError::NoLettersToEliminate)
            }
            Booster::Hint if hint_candidates(&self.secret, &self.locked, &self.input).is_empty() => {
                Err(SessionError::NoHintAvailable)
            }
            _ => Ok(()),
        }
    }

    /// Apply a booster effect (coins are the caller's concern)
    ///
    /// # Errors
    /// Same as [`GameSession::check_booster`].
    pub fn apply_booster<R: Rng + ?Sized>(
        &mut self,
        booster: Booster,
        rng: &mut R,
    ) -> Result<BoosterEffect, SessionError> {
        match booster {
            Booster::Dart => self.apply_dart(rng).map(BoosterEffect::Eliminated),
            Booster::Hint => self
                .apply_hint(rng)
                .map(|(column, letter)| BoosterEffect::Revealed { column, letter }),
            Booster::Skip => self.apply_skip().map(|()| BoosterEffect::Skipped),
        }
    }

    /// Eliminate up to three letters absent from the secret word
    ///
    /// # Errors
    /// `GameOver` or `NoLettersToEliminate`.
    pub fn apply_dart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<char>, SessionError> {
        self.check_booster(Booster::Dart)?;
        let candidates = dart_candidates(&self.secret, &self.eliminated);
        let picked = pick_dart_letters(&candidates, rng);
        self.eliminated.extend(picked.iter().copied());
        Ok(picked)
    }

    /// Reveal and lock one secret letter
    ///
    /// Typed letters shift right past the new locked column; any that no
    /// longer fit are dropped.
    ///
    /// # Errors
    /// `GameOver` or `NoHintAvailable`.
    pub fn apply_hint<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(usize, char), SessionError> {
        self.ensure_playing()?;
        let candidates = hint_candidates(&self.secret, &self.locked, &self.input);
        let column = pick_hint_column(&candidates, rng).ok_or(SessionError::NoHintAvailable)?;

        let typed: Vec<char> = self
            .input
            .char_indices()
            .filter(|(column, _)| !self.locked.contains(column))
            .map(|(_, letter)| letter)
            .collect();

        self.locked.insert(column);
        self.relayout(&typed);
        Ok((column, self.secret_letter(column)))
    }

    /// Fill the current row with the secret word and win without reward
    ///
    /// # Errors
    /// `GameOver`.
    pub fn apply_skip(&mut self) -> Result<(), SessionError> {
        self.ensure_playing()?;
        self.skipped = true;
        self.record_row(self.secret.clone(), Feedback::PERFECT);
        Ok(())
    }

    /// Outcome of a finished session, without marking it reported
    #[must_use]
    pub const fn outcome(&self) -> Option<GameOutcome> {
        if matches!(self.status, GameStatus::Playing) {
            return None;
        }
        Some(GameOutcome {
            level: self.level,
            won: matches!(self.status, GameStatus::Won),
            skipped: self.skipped,
            row: self.current_row,
        })
    }

    /// Hand out the outcome for rewarding, exactly once
    ///
    /// # Errors
    /// `StillPlaying` before the game ends, `AlreadyReported` on repeat calls.
    pub fn take_outcome(&mut self) -> Result<GameOutcome, SessionError> {
        let outcome = self.outcome().ok_or(SessionError::StillPlaying)?;
        if self.reported {
            return Err(SessionError::AlreadyReported);
        }
        self.reported = true;
        Ok(outcome)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level: self.level,
            status: self.status,
            current_row: self.current_row,
            rows: self.rows.clone(),
            input: self.input.clone(),
            preview: self.preview(),
            keyboard: self.keyboard.clone(),
            locked: self.locked.iter().copied().collect(),
            eliminated: self.eliminated.iter().copied().collect(),
            skipped: self.skipped,
            answer: self.status.is_over().then(|| self.secret.clone()),
        }
    }

    fn ensure_playing(&self) -> Result<(), SessionError> {
        if self.status.is_over() {
            return Err(SessionError::GameOver);
        }
        Ok(())
    }

    fn secret_letter(&self, column: usize) -> char {
        char::from(self.secret.char_at(column))
    }

    /// Auto-fill locked columns sitting at the cursor
    fn fill_locked(&mut self) {
        while self.input.len() < WORD_LENGTH && self.locked.contains(&self.input.len()) {
            let letter = self.secret_letter(self.input.len());
            self.input.push(letter);
        }
    }

    /// Rebuild the row from typed letters around the locked columns
    fn relayout(&mut self, typed: &[char]) {
        let mut typed = typed.iter().copied().peekable();
        let mut rebuilt = String::with_capacity(WORD_LENGTH);

        for column in 0..WORD_LENGTH {
            if typed.peek().is_none() {
                break;
            }
            if self.locked.contains(&column) {
                rebuilt.push(self.secret_letter(column));
            } else if let Some(letter) = typed.next() {
                rebuilt.push(letter);
            }
        }

        self.input = rebuilt;
        self.fill_locked();
    }

    fn record_row(&mut self, guess: Word, feedback: Feedback) {
        self.keyboard = self.keyboard.merge(&guess, feedback.verdicts());
        self.rows.push(Row { guess, feedback });
        self.input.clear();

        if feedback.is_perfect() {
            self.status = GameStatus::Won;
        } else if self.current_row + 1 >= MAX_ROWS {
            self.status = GameStatus::Lost;
        } else {
            self.current_row += 1;
            self.fill_locked();
        }
    }
}
