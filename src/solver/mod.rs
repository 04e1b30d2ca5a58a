//! Guess recommendation
//!
//! Candidate filtering, entropy scoring and the two guess strategies.

mod context;
mod engine;
pub mod entropy;
mod filter;
mod ranking;
pub mod strategy;

pub use context::SolverContext;
pub use engine::Solver;
pub use filter::{HistoryEntry, filter_indices};
pub use ranking::{GuessEval, PARALLEL_THRESHOLD, rank_guesses};
pub use strategy::{FullEntropyStrategy, RestrictedStrategy, Strategy, StrategyType};
