//! Core domain types
//!
//! Words, feedback codes and dictionaries. Everything here is pure and has
//! no knowledge of caching or solving.

mod dictionary;
mod feedback;
mod word;

pub use dictionary::{Dictionary, DictionaryError};
pub use feedback::{Feedback, FeedbackError, Mark};
pub use word::{MAX_WORD_LENGTH, Word, WordError};
