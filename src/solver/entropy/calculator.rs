//! Shannon entropy of the feedback distribution a guess induces
//!
//! Given a pattern row and a set of candidate answers, computes the expected
//! information gain of the guess.

use rustc_hash::FxHashMap;

/// Comprehensive metrics for evaluating a guess
#[derive(Debug, Clone, Copy)]
pub struct GuessMetrics {
    /// Shannon entropy (expected information gain in bits)
    pub entropy: f64,
    /// Expected number of remaining candidates after this guess
    pub expected_remaining: f64,
    /// Maximum partition size (worst-case remaining candidates)
    pub max_partition: usize,
}

/// Calculate Shannon entropy of a guess against candidates
///
/// `row[i]` is the feedback code of the guess against answer `i`; only the
/// positions in `candidates` are counted.
///
/// # Formula
/// H(X) = -Σ p(x) * log₂(p(x))
///
/// where p(x) is the share of candidates producing feedback code x.
///
/// An empty candidate set has no distribution; callers guard against it and
/// this returns 0.0. A single candidate also yields 0.0.
///
/// # Examples
/// ```
/// use wordle_oracle::solver::entropy::entropy;
///
/// // Four candidates, two codes, evenly split
/// let row = [7, 7, 3, 3];
/// assert!((entropy(&row, &[0, 1, 2, 3]) - 1.0).abs() < 1e-12);
/// assert_eq!(entropy(&row, &[0, 1]), 0.0);
/// ```
#[must_use]
pub fn entropy(row: &[u16], candidates: &[usize]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }

    let counts = histogram(row, candidates);
    shannon_entropy(&counts, candidates.len())
}

/// Count candidates per feedback code
fn histogram(row: &[u16], candidates: &[usize]) -> FxHashMap<u16, usize> {
    let mut counts = FxHashMap::default();
    for &idx in candidates {
        *counts.entry(row[idx]).or_insert(0) += 1;
    }
    counts
}

/// H = -Σ p * log₂(p) over buckets of a histogram totalling `total`
fn shannon_entropy(counts: &FxHashMap<u16, usize>, total: usize) -> f64 {
    let total = total as f64;
    counts
        .values()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Calculate entropy, expected remaining candidates and worst-case partition
#[must_use]
pub fn calculate_metrics(row: &[u16], candidates: &[usize]) -> GuessMetrics {
    if candidates.is_empty() {
        return GuessMetrics {
            entropy: 0.0,
            expected_remaining: 0.0,
            max_partition: 0,
        };
    }

    let counts = histogram(row, candidates);
    let total = candidates.len() as f64;

    let expected_remaining = counts
        .values()
        .map(|&count| count as f64 * count as f64 / total)
        .sum();

    let max_partition = counts.values().copied().max().unwrap_or(0);

    GuessMetrics {
        entropy: shannon_entropy(&counts, candidates.len()),
        expected_remaining,
        max_partition,
    }
}
