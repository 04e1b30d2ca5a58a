//! Guess ranking by entropy
//!
//! Scores every guess in a universe against the current candidate answers.
//! Large universes are split into one contiguous chunk per worker; each chunk
//! draws its own row source from the context's factory, so chunks never share
//! a memo.

use super::context::SolverContext;
use super::entropy::entropy;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::time::Instant;

/// Below this many guesses ranking stays on the calling thread
pub const PARALLEL_THRESHOLD: usize = 128;

/// A scored guess
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuessEval {
    /// Position in the dictionary's guess list
    pub guess_index: usize,
    /// Expected information in bits
    pub entropy: f64,
}

/// Rank `universe` (guess positions) by entropy over the context's candidates
///
/// The result is sorted by entropy descending, ties broken by the guess word
/// ascending, so identical inputs always rank identically regardless of how
/// the work was split.
#[must_use]
pub fn rank_guesses(ctx: &SolverContext, universe: &[usize]) -> Vec<GuessEval> {
    let started = Instant::now();
    let workers = effective_workers(ctx.workers);

    let mut ranked = if workers <= 1 || universe.len() < PARALLEL_THRESHOLD {
        score_chunk(ctx, universe)
    } else {
        let chunk_size = universe.len().div_ceil(workers);
        universe
            .par_chunks(chunk_size)
            .map(|chunk| score_chunk(ctx, chunk))
            .reduce(Vec::new, |mut acc, mut part| {
                acc.append(&mut part);
                acc
            })
    };

    sort_evals(ctx, &mut ranked);

    log::debug!(
        "ranked {} guesses over {} candidates with {} worker(s) in {:.2?}",
        ranked.len(),
        ctx.candidate_answers.len(),
        workers,
        started.elapsed()
    );
    ranked
}

/// Clamp a requested worker count; 0 means one per available core
fn effective_workers(requested: usize) -> usize {
    let available = std::thread::available_parallelism().map_or(1, std::num::NonZero::get);
    if requested == 0 {
        available
    } else {
        requested.clamp(1, available)
    }
}

fn score_chunk(ctx: &SolverContext, chunk: &[usize]) -> Vec<GuessEval> {
    let mut rows = ctx.rows.create();
    chunk
        .iter()
        .map(|&guess_index| {
            let row = rows.row(ctx.guess(guess_index), ctx.recompute);
            GuessEval {
                guess_index,
                entropy: entropy(&row, &ctx.candidate_answers),
            }
        })
        .collect()
}

fn sort_evals(ctx: &SolverContext, evals: &mut [GuessEval]) {
    evals.sort_by(|a, b| {
        b.entropy.total_cmp(&a.entropy).then_with(|| {
            if a.guess_index == b.guess_index {
                Ordering::Equal
            } else {
                ctx.guess(a.guess_index).text().cmp(ctx.guess(b.guess_index).text())
            }
        })
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Dictionary;
    use crate::patterns::RowSourceFactory;
    use std::sync::Arc;

    fn synthetic_dictionary(size: usize) -> Arc<Dictionary> {
        let letters: Vec<char> = "abcdefghijklmnopqrstuvwxyz".chars().collect();
        let words: Vec<String> = (0..size)
            .map(|i| {
                let a = letters[i % 26];
                let b = letters[(i / 26) % 26];
                let c = letters[(i * 7 + 3) % 26];
                let d = letters[(i * 11 + 5) % 26];
                format!("{a}{b}{c}{d}")
            })
            .collect();
        Arc::new(Dictionary::new(&words, &words).unwrap())
    }

    fn context(dictionary: &Arc<Dictionary>, workers: usize) -> SolverContext {
        SolverContext::new(
            Arc::clone(dictionary),
            RowSourceFactory::in_memory(Arc::clone(dictionary)),
        )
        .with_workers(workers)
    }

    #[test]
    fn parallel_matches_serial() {
        let dictionary = synthetic_dictionary(300);
        let universe: Vec<usize> = (0..dictionary.guesses().len()).collect();
        assert!(universe.len() >= PARALLEL_THRESHOLD);

        let serial = rank_guesses(&context(&dictionary, 1), &universe);
        let parallel = rank_guesses(&context(&dictionary, 4), &universe);

        assert_eq!(serial.len(), universe.len());
        assert_eq!(serial, parallel);
    }

    #[test]
    fn ranking_is_sorted_with_word_tie_break() {
        let dictionary = synthetic_dictionary(200);
        let universe: Vec<usize> = (0..dictionary.guesses().len()).collect();
        let ranked = rank_guesses(&context(&dictionary, 0), &universe);

        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.entropy >= b.entropy);
            if a.entropy.total_cmp(&b.entropy) == Ordering::Equal {
                let word_a = dictionary.guesses()[a.guess_index].text();
                let word_b = dictionary.guesses()[b.guess_index].text();
                assert!(word_a < word_b);
            }
        }
    }

    #[test]
    fn ranking_is_deterministic() {
        let dictionary = synthetic_dictionary(150);
        let universe: Vec<usize> = (0..dictionary.guesses().len()).rev().collect();
        let ctx = context(&dictionary, 3);

        assert_eq!(rank_guesses(&ctx, &universe), rank_guesses(&ctx, &universe));
    }

    #[test]
    fn durable_rows_rank_like_memory() {
        let dir = crate::test_support::TempDir::new("ranking-durable");
        let dictionary = synthetic_dictionary(200);
        let universe: Vec<usize> = (0..dictionary.guesses().len()).collect();
        let (rows, cache) = RowSourceFactory::for_cache_dir(&dictionary, Some(dir.path()));

        let durable = SolverContext::new(Arc::clone(&dictionary), rows).with_workers(4);
        let first = rank_guesses(&durable, &universe);
        let second = rank_guesses(&durable, &universe);

        assert_eq!(first, rank_guesses(&context(&dictionary, 1), &universe));
        assert_eq!(first, second);
        assert_eq!(cache.unwrap().len(), universe.len());
    }

    #[test]
    fn recompute_gives_same_scores() {
        let dictionary = synthetic_dictionary(40);
        let universe: Vec<usize> = (0..dictionary.guesses().len()).collect();
        let cached = rank_guesses(&context(&dictionary, 1), &universe);
        let forced = rank_guesses(&context(&dictionary, 1).with_recompute(true), &universe);

        assert_eq!(cached, forced);
    }

    #[test]
    fn empty_universe_ranks_nothing() {
        let dictionary = synthetic_dictionary(10);
        assert!(rank_guesses(&context(&dictionary, 2), &[]).is_empty());
    }

    #[test]
    fn worker_count_is_clamped() {
        assert!(effective_workers(0) >= 1);
        assert_eq!(effective_workers(1), 1);
        assert!(effective_workers(usize::MAX) <= effective_workers(0));
    }
}
