//! Feedback code calculation and representation
//!
//! A feedback code encodes the per-letter outcome of a guess as a base-3
//! number, position 0 being the most significant digit:
//! - 0 = Absent (letter not in the word)
//! - 1 = Present (letter in the word, wrong position)
//! - 2 = Correct (letter in the correct position)
//!
//! Codes are stored as `u16`, which covers every word length up to
//! [`MAX_WORD_LENGTH`](super::MAX_WORD_LENGTH).

use super::word::{MAX_WORD_LENGTH, Word, letter_counts};
use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Outcome for a single letter position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mark {
    Absent = 0,
    Present = 1,
    Correct = 2,
}

impl Mark {
    #[inline]
    #[must_use]
    pub const fn digit(self) -> u8 {
        self as u8
    }

    #[inline]
    const fn from_digit(digit: u16) -> Self {
        match digit {
            2 => Self::Correct,
            1 => Self::Present,
            _ => Self::Absent,
        }
    }

    /// Display symbol for this mark
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// Error type for malformed feedback strings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("feedback must be exactly {expected} digits, got {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("feedback digits must be 0, 1 or 2, got '{0}'")]
    InvalidDigit(char),
}

/// Feedback code for a guess scored against a target word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Feedback(u16);

impl Feedback {
    /// Create a feedback code from a raw value
    #[inline]
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Get the raw code value
    #[inline]
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Number of distinct codes for words of `length` letters (`3^length`)
    #[must_use]
    pub const fn pattern_count(length: usize) -> u32 {
        3u32.pow(length as u32)
    }

    /// All-correct code for words of `length` letters
    #[must_use]
    pub const fn perfect(length: usize) -> Self {
        Self((Self::pattern_count(length) - 1) as u16)
    }

    /// Check if this is a perfect match for words of `length` letters
    #[inline]
    #[must_use]
    pub const fn is_perfect(self, length: usize) -> bool {
        self.0 == Self::perfect(length).0
    }

    /// Calculate the feedback when `guess` is played against `target`
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches and remove them from the target's letter pool
    /// 2. Second pass: mark remaining guess letters present while the pool still holds them
    /// 3. Encode as base-3 number, most significant digit first
    ///
    /// # Examples
    /// ```
    /// use wordle_oracle::core::{Feedback, Word};
    ///
    /// let guess = Word::new("crane", 5).unwrap();
    /// let target = Word::new("slate", 5).unwrap();
    ///
    /// // c r a n e -> 0 0 2 0 2
    /// assert_eq!(Feedback::calculate(&guess, &target).digits(5), "00202");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, target: &Word) -> Self {
        debug_assert_eq!(guess.len(), target.len(), "words must share a length");
        Self::compute(guess.letters(), target.letters(), target.letter_counts())
    }

    /// Feedback over raw letter slices, given the target's letter pool
    pub(crate) fn compute(
        guess: &[char],
        target: &[char],
        mut available: FxHashMap<char, u8>,
    ) -> Self {
        let length = guess.len().min(target.len()).min(MAX_WORD_LENGTH);
        let mut digits = [0u8; MAX_WORD_LENGTH];

        // Allow: Index needed to compare guess[i] with target[i] and set digits[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..length {
            if guess[i] == target[i] {
                digits[i] = 2;
                if let Some(count) = available.get_mut(&guess[i]) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        #[allow(clippy::needless_range_loop)]
        for i in 0..length {
            if digits[i] == 0
                && let Some(count) = available.get_mut(&guess[i])
                && *count > 0
            {
                digits[i] = 1;
                *count -= 1;
            }
        }

        let mut code = 0u16;
        for &digit in &digits[..length] {
            code = code * 3 + u16::from(digit);
        }
        Self(code)
    }

    /// Feedback between two letter slices of the same length
    pub(crate) fn between(guess: &[char], target: &[char]) -> Self {
        Self::compute(guess, target, letter_counts(target))
    }

    /// Encode per-position marks into a code
    ///
    /// # Examples
    /// ```
    /// use wordle_oracle::core::{Feedback, Mark};
    ///
    /// let code = Feedback::encode(&[Mark::Correct, Mark::Absent, Mark::Present]);
    /// assert_eq!(code.value(), 2 * 9 + 1);
    /// ```
    #[must_use]
    pub fn encode(marks: &[Mark]) -> Self {
        Self(
            marks
                .iter()
                .fold(0u16, |code, mark| code * 3 + u16::from(mark.digit())),
        )
    }

    /// Decode into exactly `length` marks, keeping leading absent positions
    #[must_use]
    pub fn decode(self, length: usize) -> Vec<Mark> {
        let mut marks = vec![Mark::Absent; length];
        let mut value = self.0;
        for mark in marks.iter_mut().rev() {
            *mark = Mark::from_digit(value % 3);
            value /= 3;
        }
        marks
    }

    /// Render as display symbols, one per position
    #[must_use]
    pub fn render(self, length: usize) -> String {
        self.decode(length).into_iter().map(Mark::symbol).collect()
    }

    /// Render as an `length`-digit string of 0/1/2
    #[must_use]
    pub fn digits(self, length: usize) -> String {
        self.decode(length)
            .into_iter()
            .map(|mark| char::from(b'0' + mark.digit()))
            .collect()
    }

    /// Parse a user-entered string of 0/1/2 digits
    ///
    /// # Errors
    /// Returns `FeedbackError` if the string is not exactly `length` characters
    /// or contains a character other than `0`, `1` or `2`.
    ///
    /// # Examples
    /// ```
    /// use wordle_oracle::core::Feedback;
    ///
    /// let code = Feedback::parse("00212", 5).unwrap();
    /// assert_eq!(code.digits(5), "00212");
    /// assert!(Feedback::parse("0021", 5).is_err());
    /// assert!(Feedback::parse("0021x", 5).is_err());
    /// ```
    pub fn parse(s: &str, length: usize) -> Result<Self, FeedbackError> {
        let s = s.trim();
        let found = s.chars().count();
        if found != length {
            return Err(FeedbackError::InvalidLength {
                expected: length,
                found,
            });
        }

        let marks = s
            .chars()
            .map(|ch| match ch {
                '0' => Ok(Mark::Absent),
                '1' => Ok(Mark::Present),
                '2' => Ok(Mark::Correct),
                other => Err(FeedbackError::InvalidDigit(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::encode(&marks))
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
