//! Crate-level error taxonomy
//!
//! Validation errors and exhaustion errors surface here. Pattern cache
//! failures never do: they are logged and degrade to recomputation.

use crate::core::{DictionaryError, FeedbackError, WordError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error(transparent)]
    Word(#[from] WordError),
    #[error(transparent)]
    Feedback(#[from] FeedbackError),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error("expected WORD:DIGITS, got '{0}'")]
    MalformedHistory(String),
    #[error("secret '{0}' is not in the answer list")]
    UnknownSecret(String),
    #[error("no candidates remain; the feedback is inconsistent with the dictionary")]
    NoCandidates,
    #[error("no legal guess could be produced")]
    NoGuess,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SolverError {
    /// Whether this error ends the current game rather than the current input
    #[must_use]
    pub const fn is_exhaustion(&self) -> bool {
        matches!(self, Self::NoCandidates | Self::NoGuess)
    }
}
