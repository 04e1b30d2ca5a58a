//! Dictionary word representation
//!
//! A Word stores a lower-cased, fixed-length word as a sequence of letters.
//! Letters are Unicode scalar values, so non-Latin alphabets are supported.

use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Longest supported word length.
///
/// Feedback codes are stored as `u16`, and `3^10 = 59049` is the largest
/// power of three that fits.
pub const MAX_WORD_LENGTH: usize = 10;

/// A fixed-length word with its letters split out for feedback calculation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    letters: Box<[char]>,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("'{word}' must be exactly {expected} letters, got {found}")]
    InvalidLength {
        word: String,
        expected: usize,
        found: usize,
    },
    #[error("'{0}' contains characters that are not letters")]
    InvalidCharacters(String),
}

impl Word {
    /// Create a new Word of the given length from a string
    ///
    /// The text is trimmed and lower-cased before validation.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length (in letters) is not exactly `length`
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use wordle_oracle::core::Word;
    ///
    /// let word = Word::new("Crane", 5).unwrap();
    /// assert_eq!(word.text(), "crane");
    ///
    /// assert!(Word::new("too long", 5).is_err());
    /// assert!(Word::new("sh0rt", 5).is_err());
    /// ```
    pub fn new(text: &str, length: usize) -> Result<Self, WordError> {
        let text = text.trim().to_lowercase();
        let letters: Box<[char]> = text.chars().collect();

        if letters.len() != length {
            return Err(WordError::InvalidLength {
                found: letters.len(),
                word: text,
                expected: length,
            });
        }

        if !letters.iter().all(|c| c.is_alphabetic()) {
            return Err(WordError::InvalidCharacters(text));
        }

        Ok(Self { text, letters })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the letters of the word
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Number of letters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Always false for a validated word of non-zero length
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Get the count of each letter in the word
    ///
    /// Used for feedback calculation with duplicate letters.
    #[inline]
    pub(crate) fn letter_counts(&self) -> FxHashMap<char, u8> {
        letter_counts(&self.letters)
    }
}

pub(crate) fn letter_counts(letters: &[char]) -> FxHashMap<char, u8> {
    let mut counts = FxHashMap::default();
    for &ch in letters {
        *counts.entry(ch).or_insert(0) += 1;
    }
    counts
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
