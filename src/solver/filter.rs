//! Candidate narrowing from guess history

use crate::core::{Feedback, Word, WordError};
use crate::error::SolverError;

/// One played turn: the guess and the feedback it received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub guess: String,
    pub feedback: Feedback,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(guess: impl Into<String>, feedback: Feedback) -> Self {
        Self {
            guess: guess.into(),
            feedback,
        }
    }

    /// Parse `word:digits`, e.g. `crane:00102`
    ///
    /// # Errors
    /// Returns `SolverError::MalformedHistory` without a `:` separator, and the
    /// word or feedback error when either half is malformed.
    pub fn parse(s: &str, length: usize) -> Result<Self, SolverError> {
        let (guess, digits) = s
            .split_once(':')
            .ok_or_else(|| SolverError::MalformedHistory(s.to_string()))?;
        let word = Word::new(guess, length)?;
        let feedback = Feedback::parse(digits, length)?;
        Ok(Self::new(word.text(), feedback))
    }

    /// The guess as a validated word
    ///
    /// # Errors
    /// Returns `WordError` if the guess is not a `length`-letter word.
    pub fn word(&self, length: usize) -> Result<Word, WordError> {
        Word::new(&self.guess, length)
    }
}

/// Indices of `words` consistent with every entry of `history`
///
/// A word survives when replaying each guess against it reproduces the
/// recorded feedback. Guesses are lower-cased before comparison; a guess
/// whose length differs from the words matches nothing.
///
/// # Examples
/// ```
/// use wordle_oracle::core::{Dictionary, Feedback};
/// use wordle_oracle::solver::{HistoryEntry, filter_indices};
///
/// let dictionary = Dictionary::new(&["alpha", "allot", "amigo"], &["alpha", "allot", "amigo"]).unwrap();
/// let secret = &dictionary.answers()[1];
/// let feedback = Feedback::calculate(&dictionary.guesses()[0], secret);
///
/// let history = [HistoryEntry::new("ALPHA", feedback)];
/// assert_eq!(filter_indices(dictionary.answers(), &history), vec![1]);
/// ```
#[must_use]
pub fn filter_indices(words: &[Word], history: &[HistoryEntry]) -> Vec<usize> {
    if history.is_empty() {
        return (0..words.len()).collect();
    }

    let guesses: Vec<(Vec<char>, Feedback)> = history
        .iter()
        .map(|entry| (entry.guess.trim().to_lowercase().chars().collect(), entry.feedback))
        .collect();

    words
        .iter()
        .enumerate()
        .filter(|(_, candidate)| {
            guesses.iter().all(|(guess, observed)| {
                guess.len() == candidate.len()
                    && Feedback::between(guess, candidate.letters()) == *observed
            })
        })
        .map(|(idx, _)| idx)
        .collect()
}
