//! Booster kinds and their target selection
//!
//! Selection is pure given the random source, so a seeded RNG makes every
//! booster outcome reproducible.

use crate::config::BoosterCosts;
use crate::core::{WORD_LENGTH, Word};
use rand::Rng;
use rand::prelude::IndexedRandom;
use std::collections::BTreeSet;
use std::fmt;

/// Letters removed from the keyboard by one dart
pub const DART_LETTERS: usize = 3;

/// Coin-costing session aids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Booster {
    /// Eliminate up to three letters that are not in the secret word
    Dart,
    /// Reveal and lock one correct letter
    Hint,
    /// Win the level immediately, without a coin reward
    Skip,
}

impl Booster {
    pub const ALL: [Self; 3] = [Self::Dart, Self::Hint, Self::Skip];

    #[must_use]
    pub const fn cost(self, costs: &BoosterCosts) -> u32 {
        match self {
            Self::Dart => costs.dart,
            Self::Hint => costs.hint,
            Self::Skip => costs.skip,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dart => "dart",
            Self::Hint => "hint",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for Booster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a booster did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoosterEffect {
    /// Letters added to the eliminated set, alphabetical
    Eliminated(Vec<char>),
    /// Column locked to the secret letter
    Revealed { column: usize, letter: char },
    /// Current row filled with the secret word
    Skipped,
}

/// Letters outside the secret word that are not eliminated yet
#[must_use]
pub fn dart_candidates(secret: &Word, eliminated: &BTreeSet<char>) -> Vec<char> {
    (b'A'..=b'Z')
        .filter(|&letter| !secret.has_letter(letter))
        .map(char::from)
        .filter(|letter| !eliminated.contains(letter))
        .collect()
}

/// Uniformly sample up to `DART_LETTERS` candidates without replacement
pub fn pick_dart_letters<R: Rng + ?Sized>(candidates: &[char], rng: &mut R) -> Vec<char> {
    let mut picked: Vec<char> = candidates
        .choose_multiple(rng, DART_LETTERS)
        .copied()
        .collect();
    picked.sort_unstable();
    picked
}

/// Columns a hint may reveal
///
/// Excludes locked columns and columns whose typed letter already matches.
#[must_use]
pub fn hint_candidates(secret: &Word, locked: &BTreeSet<usize>, input: &str) -> Vec<usize> {
    let typed = input.as_bytes();
    (0..WORD_LENGTH)
        .filter(|column| !locked.contains(column))
        .filter(|&column| typed.get(column) != Some(&secret.char_at(column)))
        .collect()
}

/// Uniformly pick one hint column
pub fn pick_hint_column<R: Rng + ?Sized>(candidates: &[usize], rng: &mut R) -> Option<usize> {
    candidates.choose(rng).copied()
}
