//! Suggestion command
//!
//! Ranked guesses for a history, as the game loop consumes them: the top
//! `(word, entropy)` pairs plus the number of answers still possible.

use crate::error::SolverError;
use crate::solver::{HistoryEntry, Solver, Strategy};
use serde::Serialize;

/// One ranked guess
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub word: String,
    pub entropy: f64,
}

/// Ranked guesses for one turn
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionReport {
    pub candidate_count: usize,
    pub suggestions: Vec<Suggestion>,
}

impl SuggestionReport {
    /// Serialize as a single JSON document
    ///
    /// # Errors
    /// Returns a serialization error, which cannot happen for finite scores.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Rank up to `limit` guesses for `history`
///
/// # Errors
///
/// Returns `SolverError::NoCandidates` if the history rules out every answer.
pub fn suggest<S: Strategy>(
    solver: &Solver<S>,
    history: &[HistoryEntry],
    limit: usize,
) -> Result<SuggestionReport, SolverError> {
    let ctx = solver.context(history)?;
    let suggestions = solver
        .strategy()
        .top_guesses(&ctx, limit)
        .iter()
        .map(|eval| Suggestion {
            word: solver.word(eval).text().to_string(),
            entropy: eval.entropy,
        })
        .collect();

    Ok(SuggestionReport {
        candidate_count: ctx.candidate_answers.len(),
        suggestions,
    })
}
