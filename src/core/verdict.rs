//! Per-letter guess feedback
//!
//! Each letter of a submitted guess receives one verdict:
//! - Absent (letter not in the word, after duplicates are accounted for)
//! - Present (letter in the word, wrong position)
//! - Correct (letter in the correct position)
//!
//! Verdicts are ordered `Absent < Present < Correct`, which is the precedence
//! used when merging keyboard status.

use super::Word;
use super::word::WORD_LENGTH;
use serde::{Deserialize, Serialize};

/// Outcome for one letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterVerdict {
    Absent,
    Present,
    Correct,
}

impl LetterVerdict {
    /// Emoji square used in share text and line-mode output
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// Verdicts for all five letters of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feedback([LetterVerdict; WORD_LENGTH]);

impl Feedback {
    /// All correct (perfect match)
    pub const PERFECT: Self = Self([LetterVerdict::Correct; WORD_LENGTH]);

    /// Wrap an explicit verdict array
    #[must_use]
    pub const fn new(verdicts: [LetterVerdict; WORD_LENGTH]) -> Self {
        Self(verdicts)
    }

    /// Score `guess` against the secret `answer`
    ///
    /// Implements exact Wordle feedback, including duplicate letters.
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches and remove them from the available pool
    /// 2. Second pass: left to right, mark present letters while the pool lasts
    ///
    /// # Examples
    /// ```
    /// use wordle_mini::core::{Feedback, LetterVerdict::*, Word};
    ///
    /// let guess = Word::new("lolly").unwrap();
    /// let answer = Word::new("alloy").unwrap();
    ///
    /// let feedback = Feedback::calculate(&guess, &answer);
    /// assert_eq!(feedback.verdicts(), &[Present, Present, Correct, Absent, Correct]);
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, answer: &Word) -> Self {
        let mut result = [LetterVerdict::Absent; WORD_LENGTH];
        let mut answer_available = answer.char_counts();

        // First pass: exact position matches
        // Allow: Index needed to access guess[i], answer[i], and set result[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            let letter = guess.char_at(i);
            if letter == answer.char_at(i) {
                result[i] = LetterVerdict::Correct;

                if let Some(count) = answer_available.get_mut(&letter) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: wrong position, but letter still unclaimed
        // Allow: Index needed to access guess[i] and check/set result[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if result[i] == LetterVerdict::Correct {
                continue;
            }
            if let Some(count) = answer_available.get_mut(&guess.char_at(i))
                && *count > 0
            {
                result[i] = LetterVerdict::Present;
                *count -= 1;
            }
        }

        Self(result)
    }

    /// The five verdicts, in column order
    #[inline]
    #[must_use]
    pub const fn verdicts(&self) -> &[LetterVerdict; WORD_LENGTH] {
        &self.0
    }

    /// Check if every letter is correct
    #[inline]
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        *self == Self::PERFECT
    }

    /// Count the number of correct letters
    #[must_use]
    pub fn count_correct(&self) -> usize {
        self.0
            .iter()
            .filter(|&&v| v == LetterVerdict::Correct)
            .count()
    }

    /// Count the number of present letters
    #[must_use]
    pub fn count_present(&self) -> usize {
        self.0
            .iter()
            .filter(|&&v| v == LetterVerdict::Present)
            .count()
    }

    /// Convert to an emoji string like "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|v| v.emoji()).collect()
    }
}

/// Score a guess against the secret word
///
/// Free-function form of [`Feedback::calculate`] with the secret first.
#[must_use]
pub fn score_guess(secret: &Word, guess: &Word) -> [LetterVerdict; WORD_LENGTH] {
    *Feedback::calculate(guess, secret).verdicts()
}

#[cfg(test)]
mod tests {
    use super::LetterVerdict::{Absent, Correct, Present};
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn verdict_precedence() {
        assert!(Correct > Present);
        assert!(Present > Absent);
        assert_eq!(Absent.max(Correct), Correct);
    }

    #[test]
    fn feedback_all_absent_for_disjoint_words() {
        for (secret, guess) in [("CRANE", "PILOT"), ("ABBEY", "FIGHT"), ("SLATE", "DUMPY")] {
            let verdicts = score_guess(&word(secret), &word(guess));
            assert_eq!(verdicts, [Absent; 5], "{secret} vs {guess}");
        }
    }

    #[test]
    fn feedback_exact_match_is_perfect() {
        for text in ["CRANE", "SLATE", "ALLOY", "ZZZZZ", "AAAAA"] {
            let w = word(text);
            assert!(Feedback::calculate(&w, &w).is_perfect());
            assert_eq!(score_guess(&w, &w), [Correct; 5]);
        }
    }

    #[test]
    fn feedback_duplicates_consume_remaining_letters() {
        // ALLOY has two Ls; LOLLY guesses three.
        // Pass 1: L at index 2 and Y at index 4 are exact.
        // Pass 2: L(0) takes the one L left, O(1) is present, L(3) has nothing left.
        let verdicts = score_guess(&word("ALLOY"), &word("LOLLY"));
        assert_eq!(verdicts, [Present, Present, Correct, Absent, Correct]);
    }

    #[test]
    fn feedback_duplicate_left_to_right_tie_break() {
        // One E in the secret; the earlier wrong-position E claims it
        let verdicts = score_guess(&word("CRANE"), &word("EERIE"));
        assert_eq!(verdicts, [Absent, Absent, Present, Absent, Correct]);

        let verdicts = score_guess(&word("ABBEY"), &word("EERIE"));
        assert_eq!(verdicts, [Present, Absent, Absent, Absent, Absent]);
    }

    #[test]
    fn feedback_exact_match_beats_earlier_duplicate() {
        // ROBOT vs FLOOR: the second O is exact, the first takes the other O
        let verdicts = score_guess(&word("FLOOR"), &word("ROBOT"));
        assert_eq!(verdicts, [Present, Present, Absent, Correct, Absent]);
    }

    #[test]
    fn feedback_counts() {
        let feedback = Feedback::calculate(&word("CRANE"), &word("SLATE"));
        assert_eq!(feedback.count_correct(), 2); // A and E
        assert_eq!(feedback.count_present(), 0);
    }

    #[test]
    fn feedback_present_never_exceeds_secret_letter_count() {
        let words = ["ALLOY", "LOLLY", "SPEED", "EERIE", "ABBEY", "CRANE", "LLAMA", "TASTE"];
        for secret in words {
            for guess in words {
                let (s, g) = (word(secret), word(guess));
                let verdicts = score_guess(&s, &g);
                for letter in b'A'..=b'Z' {
                    let in_secret = s.chars().iter().filter(|&&c| c == letter).count();
                    let marked = (0..5)
                        .filter(|&i| g.char_at(i) == letter && verdicts[i] != Absent)
                        .count();
                    assert!(marked <= in_secret, "{secret} vs {guess} letter {letter}");
                }
            }
        }
    }

    #[test]
    fn feedback_to_emoji() {
        let feedback = Feedback::calculate(&word("LOLLY"), &word("ALLOY"));
        assert_eq!(feedback.to_emoji(), "🟨🟨🟩⬜🟩");
        assert_eq!(Feedback::PERFECT.to_emoji(), "🟩🟩🟩🟩🟩");
    }
}
