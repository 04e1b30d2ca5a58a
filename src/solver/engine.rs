//! Main solver interface

use super::context::SolverContext;
use super::filter::{HistoryEntry, filter_indices};
use super::ranking::GuessEval;
use super::strategy::Strategy;
use crate::core::{Dictionary, Word};
use crate::error::SolverError;
use crate::patterns::RowSourceFactory;
use std::sync::Arc;

/// Main solver
///
/// Coordinates the per-turn candidate lifecycle: narrows the answers by the
/// history, builds a fresh [`SolverContext`] and hands it to the strategy.
pub struct Solver<S: Strategy> {
    strategy: S,
    dictionary: Arc<Dictionary>,
    rows: RowSourceFactory,
    workers: usize,
    recompute: bool,
    filter_guesses: bool,
}

impl<S: Strategy> Solver<S> {
    /// Create a new solver with the given strategy, dictionary and row source
    #[must_use]
    pub const fn new(strategy: S, dictionary: Arc<Dictionary>, rows: RowSourceFactory) -> Self {
        Self {
            strategy,
            dictionary,
            rows,
            workers: 1,
            recompute: false,
            filter_guesses: false,
        }
    }

    /// Worker hint for ranking; 0 picks one per core
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Bypass stored pattern rows on every lookup
    #[must_use]
    pub fn with_recompute(mut self, recompute: bool) -> Self {
        self.recompute = recompute;
        self
    }

    /// Hand the strategy the guesses consistent with the history
    ///
    /// Without this the restricted strategy derives its universe from the
    /// candidate answers alone.
    #[must_use]
    pub fn with_guess_filtering(mut self, filter_guesses: bool) -> Self {
        self.filter_guesses = filter_guesses;
        self
    }

    #[must_use]
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    #[must_use]
    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// Answer positions consistent with `history`
    #[must_use]
    pub fn candidates(&self, history: &[HistoryEntry]) -> Vec<usize> {
        filter_indices(self.dictionary.answers(), history)
    }

    /// Guess positions consistent with `history`
    #[must_use]
    pub fn candidate_guesses(&self, history: &[HistoryEntry]) -> Vec<usize> {
        filter_indices(self.dictionary.guesses(), history)
    }

    /// Count how many candidates remain given the history
    #[must_use]
    pub fn count_candidates(&self, history: &[HistoryEntry]) -> usize {
        self.candidates(history).len()
    }

    /// Candidate answers as words
    #[must_use]
    pub fn candidate_words(&self, history: &[HistoryEntry]) -> Vec<&Word> {
        let answers = self.dictionary.answers();
        self.candidates(history)
            .into_iter()
            .map(|idx| &answers[idx])
            .collect()
    }

    /// Build this turn's context
    ///
    /// # Errors
    /// Returns `SolverError::NoCandidates` if no answer survives the history.
    pub fn context(&self, history: &[HistoryEntry]) -> Result<SolverContext, SolverError> {
        let candidates = self.candidates(history);
        if candidates.is_empty() {
            return Err(SolverError::NoCandidates);
        }

        let candidate_guesses = self
            .filter_guesses
            .then(|| self.candidate_guesses(history));

        Ok(
            SolverContext::new(Arc::clone(&self.dictionary), self.rows.clone())
                .with_candidates(candidates)
                .with_candidate_guesses(candidate_guesses)
                .with_workers(self.workers)
                .with_recompute(self.recompute),
        )
    }

    /// Get the next best guess given the history
    ///
    /// # Errors
    /// Returns `SolverError::NoCandidates` if the history rules out every
    /// answer, or `SolverError::NoGuess` if the strategy has nothing to offer.
    pub fn next_guess(&self, history: &[HistoryEntry]) -> Result<GuessEval, SolverError> {
        let ctx = self.context(history)?;
        self.strategy.next_guess(&ctx)
    }

    /// Up to `limit` guesses ranked by entropy
    ///
    /// # Errors
    /// Returns `SolverError::NoCandidates` if the history rules out every answer.
    pub fn top_guesses(
        &self,
        history: &[HistoryEntry],
        limit: usize,
    ) -> Result<Vec<GuessEval>, SolverError> {
        let ctx = self.context(history)?;
        Ok(self.strategy.top_guesses(&ctx, limit))
    }

    /// The guess word an evaluation refers to
    #[must_use]
    pub fn word(&self, eval: &GuessEval) -> &Word {
        &self.dictionary.guesses()[eval.guess_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Feedback;
    use crate::solver::{FullEntropyStrategy, RestrictedStrategy, StrategyType};

    fn dictionary() -> Arc<Dictionary> {
        Arc::new(
            Dictionary::new(
                &["crane", "slate", "irate", "crate", "grate"],
                &["irate", "crate", "grate"],
            )
            .unwrap(),
        )
    }

    fn solver<S: Strategy>(strategy: S) -> Solver<S> {
        let dictionary = dictionary();
        Solver::new(
            strategy,
            Arc::clone(&dictionary),
            RowSourceFactory::in_memory(dictionary),
        )
    }

    fn entry(solver: &Solver<impl Strategy>, guess: &str, secret: &str) -> HistoryEntry {
        let guess_word = solver.dictionary().word(guess).unwrap();
        let secret_word = solver.dictionary().word(secret).unwrap();
        HistoryEntry::new(guess, Feedback::calculate(&guess_word, &secret_word))
    }

    #[test]
    fn next_guess_with_empty_history() {
        let solver = solver(FullEntropyStrategy);
        let eval = solver.next_guess(&[]).unwrap();
        assert!(eval.guess_index < solver.dictionary().guesses().len());
        assert!(eval.entropy > 0.0);
    }

    #[test]
    fn restricted_guess_is_a_candidate() {
        let solver = solver(RestrictedStrategy);
        let history = [entry(&solver, "slate", "grate")];
        let eval = solver.next_guess(&history).unwrap();

        let candidates: Vec<&str> = solver.candidate_words(&history).iter().map(|w| w.text()).collect();
        assert!(candidates.contains(&solver.word(&eval).text()));
    }

    #[test]
    fn no_candidates_is_an_error() {
        let solver = solver(StrategyType::Full);
        let history = [HistoryEntry::new("slate", Feedback::perfect(5))];

        assert_eq!(solver.count_candidates(&history), 0);
        assert!(matches!(solver.next_guess(&history), Err(SolverError::NoCandidates)));
        assert!(matches!(solver.top_guesses(&history, 3), Err(SolverError::NoCandidates)));
    }

    #[test]
    fn count_candidates_decreases() {
        let solver = solver(RestrictedStrategy);
        assert_eq!(solver.count_candidates(&[]), 3);

        let history = [entry(&solver, "crane", "irate")];
        assert!(solver.count_candidates(&history) <= 3);
        assert!(solver.candidates(&history).contains(&0));
    }

    #[test]
    fn exact_match_leaves_one_candidate() {
        let solver = solver(RestrictedStrategy);
        let history = [HistoryEntry::new("irate", Feedback::perfect(5))];

        let words = solver.candidate_words(&history);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text(), "irate");
    }

    #[test]
    fn candidate_guesses_cover_guess_list() {
        let solver = solver(RestrictedStrategy);
        let history = [entry(&solver, "crane", "grate")];
        let guesses = solver.candidate_guesses(&history);

        assert!(guesses.iter().all(|&idx| idx < 5));
        assert!(guesses.contains(&solver.dictionary().guess_position("grate").unwrap()));
    }

    #[test]
    fn context_carries_settings() {
        let solver = solver(RestrictedStrategy).with_workers(4).with_recompute(true);
        let ctx = solver.context(&[]).unwrap();

        assert_eq!(ctx.workers, 4);
        assert!(ctx.recompute);
        assert_eq!(ctx.candidate_answers, vec![0, 1, 2]);
        assert_eq!(ctx.dictionary_hash(), solver.dictionary().hash());
        assert_eq!(ctx.word_length(), 5);
        assert!(ctx.candidate_guesses.is_none());
    }

    #[test]
    fn guess_filtering_feeds_the_context() {
        let solver = solver(RestrictedStrategy).with_guess_filtering(true);
        let history = [entry(&solver, "crane", "grate")];
        let ctx = solver.context(&history).unwrap();

        assert_eq!(ctx.candidate_guesses, Some(solver.candidate_guesses(&history)));
        let eval = solver.next_guess(&history).unwrap();
        assert!(solver.candidate_guesses(&history).contains(&eval.guess_index));
    }

    #[test]
    fn top_guesses_are_sorted() {
        let solver = solver(FullEntropyStrategy);
        let top = solver.top_guesses(&[], 5).unwrap();
        assert_eq!(top.len(), 5);
        assert!(top.windows(2).all(|pair| pair[0].entropy >= pair[1].entropy));
    }
}
