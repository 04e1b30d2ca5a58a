//! Per-turn solver input
//!
//! Rebuilt every turn from the dictionary and the current candidate sets;
//! never mutated while a strategy is ranking.

use crate::core::{Dictionary, Word};
use crate::patterns::RowSourceFactory;
use std::sync::Arc;

/// Everything a strategy needs to rank guesses for one turn
#[derive(Debug, Clone)]
pub struct SolverContext {
    pub dictionary: Arc<Dictionary>,
    /// Every guess position, `0..guesses.len()`
    pub guess_indices: Vec<usize>,
    /// Every answer position, `0..answers.len()`
    pub answer_indices: Vec<usize>,
    /// Answers still consistent with the history
    pub candidate_answers: Vec<usize>,
    /// Guesses still consistent with the history, when precomputed
    pub candidate_guesses: Option<Vec<usize>>,
    /// Bypass stored pattern rows
    pub recompute: bool,
    /// Requested parallelism; clamped when ranking
    pub workers: usize,
    pub rows: RowSourceFactory,
}

impl SolverContext {
    /// Context over the whole dictionary, before any guess
    #[must_use]
    pub fn new(dictionary: Arc<Dictionary>, rows: RowSourceFactory) -> Self {
        let guess_indices: Vec<usize> = (0..dictionary.guesses().len()).collect();
        let answer_indices: Vec<usize> = (0..dictionary.answers().len()).collect();
        Self {
            candidate_answers: answer_indices.clone(),
            guess_indices,
            answer_indices,
            candidate_guesses: None,
            recompute: false,
            workers: 1,
            dictionary,
            rows,
        }
    }

    #[must_use]
    pub fn with_candidates(mut self, candidate_answers: Vec<usize>) -> Self {
        self.candidate_answers = candidate_answers;
        self
    }

    #[must_use]
    pub fn with_candidate_guesses(mut self, candidate_guesses: Option<Vec<usize>>) -> Self {
        self.candidate_guesses = candidate_guesses;
        self
    }

    #[must_use]
    pub fn with_recompute(mut self, recompute: bool) -> Self {
        self.recompute = recompute;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[inline]
    #[must_use]
    pub fn word_length(&self) -> usize {
        self.dictionary.word_length()
    }

    #[inline]
    #[must_use]
    pub fn dictionary_hash(&self) -> &str {
        self.dictionary.hash()
    }

    /// The guess word at `index`
    #[inline]
    #[must_use]
    pub fn guess(&self, index: usize) -> &Word {
        &self.dictionary.guesses()[index]
    }
}
