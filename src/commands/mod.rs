//! Command implementations

pub mod analyze;
pub mod play;
pub mod precompute;
pub mod simulate;
pub mod solve;
pub mod suggest;

pub use analyze::{AnalysisResult, analyze_word};
pub use play::{PlayEvent, PlaySession, run_play};
pub use precompute::{PrecomputeResult, run_precompute};
pub use simulate::{SimulationRange, SimulationStatistics, run_simulation};
pub use solve::{GuessStep, SolveConfig, SolveResult, solve_word};
pub use suggest::{Suggestion, SuggestionReport, suggest};
