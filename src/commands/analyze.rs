//! Word analysis command
//!
//! Scores one guess against the candidates left by a history.

use crate::error::SolverError;
use crate::solver::entropy::calculate_metrics;
use crate::solver::{HistoryEntry, Solver, Strategy};

/// Result of analyzing a word
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub word: String,
    pub entropy: f64,
    pub expected_reduction: f64,
    pub expected_remaining: f64,
    pub worst_case: usize,
    pub total_candidates: usize,
    /// Whether the word could itself be the answer
    pub is_candidate: bool,
}

/// Analyze a guess against the candidates consistent with `history`
///
/// # Errors
///
/// Returns an error if:
/// - The word is not a valid word of the dictionary's length
/// - No candidate survives the history
pub fn analyze_word<S: Strategy>(
    word: &str,
    history: &[HistoryEntry],
    solver: &Solver<S>,
) -> Result<AnalysisResult, SolverError> {
    let dictionary = solver.dictionary();
    let guess = dictionary.word(word)?;

    let ctx = solver.context(history)?;
    let mut rows = ctx.rows.create();
    let row = rows.row(&guess, ctx.recompute);
    let metrics = calculate_metrics(&row, &ctx.candidate_answers);

    let is_candidate = dictionary
        .answer_position(guess.text())
        .is_some_and(|idx| ctx.candidate_answers.contains(&idx));

    Ok(AnalysisResult {
        word: guess.text().to_string(),
        entropy: metrics.entropy,
        expected_reduction: metrics.entropy.exp2(),
        expected_remaining: metrics.expected_remaining,
        worst_case: metrics.max_partition,
        total_candidates: ctx.candidate_answers.len(),
        is_candidate,
    })
}
