//! Guess and answer word lists with their content signature
//!
//! The signature identifies a dictionary version. Pattern caches are keyed by
//! it, so any change to either list lands in a fresh cache directory.

use super::word::{MAX_WORD_LENGTH, Word, WordError};
use rustc_hash::FxHashMap;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Error type for dictionaries that cannot be used for solving
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictionaryError {
    #[error("guess list is empty")]
    EmptyGuesses,
    #[error("answer list is empty")]
    EmptyAnswers,
    #[error("word length {0} is not supported (expected 1..={max})", max = MAX_WORD_LENGTH)]
    UnsupportedLength(usize),
    #[error(transparent)]
    InvalidWord(#[from] WordError),
}

/// Both word lists of one game, validated to a common length
#[derive(Debug, Clone)]
pub struct Dictionary {
    guesses: Vec<Word>,
    answers: Vec<Word>,
    guess_index: FxHashMap<String, usize>,
    answer_index: FxHashMap<String, usize>,
    word_length: usize,
    hash: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Signature<'a> {
    guess_count: usize,
    answer_count: usize,
    guesses: Vec<&'a str>,
    answers: Vec<&'a str>,
}

impl Dictionary {
    /// Build a dictionary from raw guess and answer lists
    ///
    /// Words are lower-cased and de-duplicated (first occurrence wins). The word
    /// length is taken from the first answer; every other word must match it.
    ///
    /// # Errors
    /// Returns `DictionaryError` if either list is empty, the length is out of
    /// range, or any word is malformed.
    ///
    /// # Examples
    /// ```
    /// use wordle_oracle::core::Dictionary;
    ///
    /// let dictionary = Dictionary::new(&["CRANE", "slate", "crane"], &["slate"]).unwrap();
    /// assert_eq!(dictionary.guesses().len(), 2);
    /// assert_eq!(dictionary.word_length(), 5);
    /// assert_eq!(dictionary.hash().len(), 64);
    /// ```
    pub fn new<S: AsRef<str>>(guesses: &[S], answers: &[S]) -> Result<Self, DictionaryError> {
        if answers.is_empty() {
            return Err(DictionaryError::EmptyAnswers);
        }
        if guesses.is_empty() {
            return Err(DictionaryError::EmptyGuesses);
        }

        let word_length = answers[0].as_ref().trim().chars().count();
        if word_length == 0 || word_length > MAX_WORD_LENGTH {
            return Err(DictionaryError::UnsupportedLength(word_length));
        }

        let (guesses, guess_index) = build_list(guesses, word_length)?;
        let (answers, answer_index) = build_list(answers, word_length)?;
        let hash = signature(&guesses, &answers);

        let missing = answers
            .iter()
            .filter(|w| !guess_index.contains_key(w.text()))
            .count();
        if missing > 0 {
            log::warn!(
                "{missing} answer(s) are missing from the guess list; the restricted strategy will skip them"
            );
        }

        Ok(Self {
            guesses,
            answers,
            guess_index,
            answer_index,
            word_length,
            hash,
        })
    }

    /// Every word that may legally be guessed
    #[inline]
    #[must_use]
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    /// Every word that may be the secret
    #[inline]
    #[must_use]
    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    #[inline]
    #[must_use]
    pub const fn word_length(&self) -> usize {
        self.word_length
    }

    /// Hex-encoded SHA-256 content signature over both lists
    #[inline]
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Position of a word in the guess list
    #[must_use]
    pub fn guess_position(&self, word: &str) -> Option<usize> {
        self.guess_index.get(word).copied()
    }

    /// Position of a word in the answer list
    #[must_use]
    pub fn answer_position(&self, word: &str) -> Option<usize> {
        self.answer_index.get(word).copied()
    }

    /// Validate free-form text as a word of this dictionary's length
    ///
    /// # Errors
    /// Returns `WordError` if the text has the wrong length or non-letters.
    pub fn word(&self, text: &str) -> Result<Word, WordError> {
        Word::new(text, self.word_length)
    }
}

fn build_list<S: AsRef<str>>(
    raw: &[S],
    length: usize,
) -> Result<(Vec<Word>, FxHashMap<String, usize>), DictionaryError> {
    let mut words = Vec::with_capacity(raw.len());
    let mut index = FxHashMap::default();

    for text in raw {
        let word = Word::new(text.as_ref(), length)?;
        if !index.contains_key(word.text()) {
            index.insert(word.text().to_string(), words.len());
            words.push(word);
        }
    }

    Ok((words, index))
}

/// Content signature over guess and answer lists, sizes included
fn signature(guesses: &[Word], answers: &[Word]) -> String {
    let document = Signature {
        guess_count: guesses.len(),
        answer_count: answers.len(),
        guesses: guesses.iter().map(Word::text).collect(),
        answers: answers.iter().map(Word::text).collect(),
    };

    // Serializing plain strings and integers cannot fail
    let encoded = serde_json::to_vec(&document).unwrap_or_default();
    hex::encode(Sha256::digest(&encoded))
}
