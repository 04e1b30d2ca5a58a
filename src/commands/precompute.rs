//! Pattern row precomputation
//!
//! Pulls the row of every guess through a row source so a durable cache ends
//! up holding the whole guess list.

use crate::core::Dictionary;
use crate::patterns::RowSource;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Result of a precompute run
#[derive(Debug, Clone, Copy)]
pub struct PrecomputeResult {
    pub rows: usize,
    pub answers: usize,
    pub duration: Duration,
}

/// Fetch (and so store) the row of every guess
///
/// With `recompute` set every row is rebuilt and rewritten in place.
/// Flushing the source afterwards is the caller's job.
///
/// # Panics
///
/// Panics if the progress bar template is malformed.
pub fn run_precompute(
    dictionary: &Dictionary,
    source: &mut dyn RowSource,
    recompute: bool,
) -> PrecomputeResult {
    let guesses = dictionary.guesses();
    let pb = ProgressBar::new(guesses.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
            .expect("valid progress template")
            .progress_chars("█▓▒░"),
    );

    let started = Instant::now();
    for guess in guesses {
        let row = source.row(guess, recompute);
        debug_assert_eq!(row.len(), dictionary.answers().len());
        pb.set_message(guess.text().to_string());
        pb.inc(1);
    }
    pb.finish_with_message("Complete!");

    let duration = started.elapsed();
    log::info!("precomputed {} rows in {duration:.2?}", guesses.len());

    PrecomputeResult {
        rows: guesses.len(),
        answers: dictionary.answers().len(),
        duration,
    }
}
