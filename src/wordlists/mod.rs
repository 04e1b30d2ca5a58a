//! Word lists
//!
//! Guess and answer lists are read from disk at startup.

pub mod loader;

pub use loader::{load_from_file, parse_words};
