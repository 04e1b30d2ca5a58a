//! Entropy evaluation
//!
//! Shannon entropy of feedback distributions over the candidate set. This is
//! the scoring function every strategy ranks guesses by.

mod calculator;

pub use calculator::{GuessMetrics, calculate_metrics, entropy};
