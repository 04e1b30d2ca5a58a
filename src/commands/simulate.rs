//! Simulate every answer - comprehensive solver evaluation
//!
//! Runs the solver against a slice of the answer list and gathers statistics.

use super::solve::{SolveConfig, SolveResult, solve_word};
use crate::error::SolverError;
use crate::solver::{Solver, Strategy};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Which part of the answer list to simulate
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationRange {
    pub start: usize,
    pub limit: Option<usize>,
}

impl SimulationRange {
    /// Clamp to `0..total`
    #[must_use]
    pub fn bounds(&self, total: usize) -> (usize, usize) {
        let start = self.start.min(total);
        let end = self
            .limit
            .map_or(total, |limit| total.min(start.saturating_add(limit)));
        (start, end)
    }
}

/// Statistics from simulating a range of secrets
#[derive(Debug)]
pub struct SimulationStatistics {
    pub strategy: &'static str,
    pub processed: usize,
    pub solved: usize,
    /// Secret and reason, in simulation order
    pub failures: Vec<(String, String)>,
    /// Rounds -> number of secrets solved in that many rounds
    pub distribution: BTreeMap<usize, usize>,
    pub average_rounds: f64,
    pub longest: Option<(String, usize)>,
    pub elapsed: Duration,
    pub results: Vec<SolveResult>,
}

/// Run the solver on every secret in `range`
///
/// # Errors
///
/// Propagates any solver error other than candidate or guess exhaustion,
/// which are recorded as failures.
///
/// # Panics
///
/// Panics if the progress bar template is malformed.
pub fn run_simulation<S: Strategy>(
    solver: &Solver<S>,
    range: SimulationRange,
) -> Result<SimulationStatistics, SolverError> {
    let answers = solver.dictionary().answers();
    let (start, end) = range.bounds(answers.len());
    let max_turns = solver.dictionary().word_length() + 3;

    let pb = ProgressBar::new((end - start) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .expect("valid progress template")
            .progress_chars("█▓▒░"),
    );

    let started = Instant::now();
    let mut results = Vec::with_capacity(end - start);

    for secret in &answers[start..end] {
        let config = SolveConfig {
            secret: secret.text().to_string(),
            max_turns,
        };
        let result = solve_word(&config, solver)?;

        log::debug!(
            "{}: {} in {} round(s)",
            result.secret,
            if result.success { "solved" } else { "failed" },
            result.rounds
        );
        if let Some(reason) = &result.failure {
            log::warn!("{} not solved: {reason}", result.secret);
        }

        results.push(result);
        if results.len() % 10 == 0 {
            pb.set_message(format!("Avg: {:.2}", average_rounds(&results)));
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete!");

    Ok(collect_statistics(
        solver.strategy().name(),
        results,
        started.elapsed(),
    ))
}

fn average_rounds(results: &[SolveResult]) -> f64 {
    let solved: Vec<usize> = results
        .iter()
        .filter(|r| r.success)
        .map(|r| r.rounds)
        .collect();
    if solved.is_empty() {
        0.0
    } else {
        solved.iter().sum::<usize>() as f64 / solved.len() as f64
    }
}

fn collect_statistics(
    strategy: &'static str,
    results: Vec<SolveResult>,
    elapsed: Duration,
) -> SimulationStatistics {
    let mut distribution = BTreeMap::new();
    let mut longest: Option<(String, usize)> = None;
    let mut failures = Vec::new();

    for result in &results {
        if result.success {
            *distribution.entry(result.rounds).or_insert(0) += 1;
            if longest.as_ref().is_none_or(|(_, rounds)| result.rounds >= *rounds) {
                longest = Some((result.secret.clone(), result.rounds));
            }
        } else {
            let reason = result.failure.clone().unwrap_or_else(|| "unknown reason".to_string());
            failures.push((result.secret.clone(), reason));
        }
    }

    SimulationStatistics {
        strategy,
        processed: results.len(),
        solved: results.len() - failures.len(),
        failures,
        distribution,
        average_rounds: average_rounds(&results),
        longest,
        elapsed,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Dictionary;
    use crate::patterns::RowSourceFactory;
    use crate::solver::StrategyType;
    use std::sync::Arc;

    fn solver() -> Solver<StrategyType> {
        let words = ["crane", "slate", "irate", "crate", "grate", "floor", "robot", "abbey"];
        let dictionary = Arc::new(Dictionary::new(&words, &words).unwrap());
        Solver::new(
            StrategyType::Restricted,
            Arc::clone(&dictionary),
            RowSourceFactory::in_memory(dictionary),
        )
    }

    #[test]
    fn range_bounds_are_clamped() {
        let all = SimulationRange::default();
        assert_eq!(all.bounds(10), (0, 10));

        let slice = SimulationRange { start: 3, limit: Some(4) };
        assert_eq!(slice.bounds(10), (3, 7));

        let past_end = SimulationRange { start: 20, limit: Some(4) };
        assert_eq!(past_end.bounds(10), (10, 10));

        let long = SimulationRange { start: 8, limit: Some(usize::MAX) };
        assert_eq!(long.bounds(10), (8, 10));
    }

    #[test]
    fn simulation_solves_everything() {
        let solver = solver();
        let stats = run_simulation(&solver, SimulationRange::default()).unwrap();

        assert_eq!(stats.strategy, "restricted");
        assert_eq!(stats.processed, 8);
        assert_eq!(stats.solved, 8);
        assert!(stats.failures.is_empty());
        assert_eq!(stats.distribution.values().sum::<usize>(), 8);
        assert!(stats.average_rounds >= 1.0);

        let (_, longest) = stats.longest.unwrap();
        assert_eq!(Some(&longest), stats.distribution.keys().next_back());
    }

    #[test]
    fn simulation_honours_range() {
        let solver = solver();
        let range = SimulationRange { start: 2, limit: Some(3) };
        let stats = run_simulation(&solver, range).unwrap();

        assert_eq!(stats.processed, 3);
        let secrets: Vec<&str> = stats.results.iter().map(|r| r.secret.as_str()).collect();
        assert_eq!(secrets, vec!["irate", "crate", "grate"]);
    }

    #[test]
    fn empty_range_is_empty() {
        let solver = solver();
        let range = SimulationRange { start: 100, limit: None };
        let stats = run_simulation(&solver, range).unwrap();

        assert_eq!(stats.processed, 0);
        assert!(stats.longest.is_none());
        assert!(stats.average_rounds.abs() < f64::EPSILON);
    }
}
