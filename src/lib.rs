//! Wordle Oracle
//!
//! Entropy-driven guess recommendations for Wordle-style games of any word
//! length and alphabet, backed by a durable on-disk pattern cache.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use wordle_oracle::core::Dictionary;
//! use wordle_oracle::patterns::RowSourceFactory;
//! use wordle_oracle::solver::{Solver, StrategyType};
//!
//! let words = ["crane", "slate", "irate"];
//! let dictionary = Arc::new(Dictionary::new(&words, &words).unwrap());
//! let rows = RowSourceFactory::in_memory(Arc::clone(&dictionary));
//! let solver = Solver::new(StrategyType::Restricted, dictionary, rows);
//!
//! let best = solver.next_guess(&[]).unwrap();
//! println!("{} ({:.3} bits)", solver.word(&best), best.entropy);
//! ```

// Core domain types
pub mod core;

// Crate error taxonomy
pub mod error;

// Pattern rows and the durable cache
pub mod patterns;

// Solving algorithms
pub mod solver;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
