//! Guess selection strategies
//!
//! Defines the Strategy trait and concrete implementations. A strategy only
//! decides which guesses are eligible; scoring is shared through
//! [`rank_guesses`].

use super::context::SolverContext;
use super::ranking::{GuessEval, rank_guesses};
use crate::error::SolverError;
use rustc_hash::FxHashSet;

/// A strategy for choosing the next guess
pub trait Strategy {
    /// Short identifier, as accepted by [`StrategyType::from_name`]
    fn name(&self) -> &'static str;

    /// Guess positions this strategy is willing to propose
    fn guess_universe(&self, ctx: &SolverContext) -> Vec<usize>;

    /// Guesses from the universe sorted by entropy, at most `limit`
    fn top_guesses(&self, ctx: &SolverContext, limit: usize) -> Vec<GuessEval> {
        let mut ranked = rank_guesses(ctx, &self.guess_universe(ctx));
        ranked.truncate(limit);
        ranked
    }

    /// The single best guess
    ///
    /// # Errors
    /// Returns `SolverError::NoGuess` if the universe is empty.
    fn next_guess(&self, ctx: &SolverContext) -> Result<GuessEval, SolverError> {
        self.top_guesses(ctx, 1)
            .into_iter()
            .next()
            .ok_or(SolverError::NoGuess)
    }
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyType {
    /// Only words that could still be the answer
    #[default]
    Restricted,
    /// Every word in the guess list
    Full,
}

impl StrategyType {
    /// Create strategy from name string
    ///
    /// Supported names: "restricted", "full", "full-entropy".
    /// Defaults to restricted if name is unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "full" | "full-entropy" => Self::Full,
            _ => Self::Restricted,
        }
    }
}

impl Strategy for StrategyType {
    fn name(&self) -> &'static str {
        match self {
            Self::Restricted => RestrictedStrategy.name(),
            Self::Full => FullEntropyStrategy.name(),
        }
    }

    fn guess_universe(&self, ctx: &SolverContext) -> Vec<usize> {
        match self {
            Self::Restricted => RestrictedStrategy.guess_universe(ctx),
            Self::Full => FullEntropyStrategy.guess_universe(ctx),
        }
    }
}

/// Maximizes information over the whole guess list
#[derive(Debug, Clone, Copy, Default)]
pub struct FullEntropyStrategy;

impl Strategy for FullEntropyStrategy {
    fn name(&self) -> &'static str {
        "full"
    }

    fn guess_universe(&self, ctx: &SolverContext) -> Vec<usize> {
        ctx.guess_indices.clone()
    }
}

/// Only proposes guesses that can still win outright
#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictedStrategy;

impl Strategy for RestrictedStrategy {
    fn name(&self) -> &'static str {
        "restricted"
    }

    fn guess_universe(&self, ctx: &SolverContext) -> Vec<usize> {
        if let Some(candidate_guesses) = &ctx.candidate_guesses {
            return candidate_guesses.clone();
        }

        let answers = ctx.dictionary.answers();
        let mut seen = FxHashSet::default();
        ctx.candidate_answers
            .iter()
            .filter_map(|&idx| ctx.dictionary.guess_position(answers[idx].text()))
            .filter(|&pos| seen.insert(pos))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dictionary, Feedback};
    use crate::patterns::RowSourceFactory;
    use crate::solver::{HistoryEntry, filter_indices};
    use std::sync::Arc;

    fn context(guesses: &[&str], answers: &[&str]) -> SolverContext {
        let dictionary = Arc::new(Dictionary::new(guesses, answers).unwrap());
        SolverContext::new(
            Arc::clone(&dictionary),
            RowSourceFactory::in_memory(dictionary),
        )
    }

    #[test]
    fn from_name_defaults_to_restricted() {
        assert_eq!(StrategyType::from_name("full"), StrategyType::Full);
        assert_eq!(StrategyType::from_name("full-entropy"), StrategyType::Full);
        assert_eq!(StrategyType::from_name("restricted"), StrategyType::Restricted);
        assert_eq!(StrategyType::from_name("whatever"), StrategyType::Restricted);
        assert_eq!(StrategyType::Full.name(), "full");
    }

    #[test]
    fn full_universe_is_every_guess() {
        let ctx = context(&["crane", "slate", "irate", "gizmo"], &["slate", "irate"]);
        assert_eq!(FullEntropyStrategy.guess_universe(&ctx), vec![0, 1, 2, 3]);
    }

    #[test]
    fn restricted_universe_only_holds_candidates() {
        let ctx = context(
            &["crane", "slate", "irate", "crate", "grate"],
            &["grate", "slate", "floor", "crate"],
        );
        let secret = &ctx.dictionary.answers()[3];
        let history = [HistoryEntry::new(
            "irate",
            Feedback::calculate(&ctx.dictionary.guesses()[2], secret),
        )];
        let candidates = filter_indices(ctx.dictionary.answers(), &history);
        let ctx = ctx.with_candidates(candidates.clone());

        let universe = RestrictedStrategy.guess_universe(&ctx);
        assert!(!universe.is_empty());
        for guess_index in &universe {
            let word = ctx.guess(*guess_index).text();
            let answer = ctx.dictionary.answer_position(word).unwrap();
            assert!(candidates.contains(&answer));
        }

        for eval in RestrictedStrategy.top_guesses(&ctx, 10) {
            assert!(universe.contains(&eval.guess_index));
        }
    }

    #[test]
    fn restricted_universe_skips_answers_missing_from_guesses() {
        let ctx = context(&["slate", "crane"], &["floor", "crane", "slate", "crane"]);
        // floor has no guess position; crane is deduplicated
        assert_eq!(RestrictedStrategy.guess_universe(&ctx), vec![1, 0]);
    }

    #[test]
    fn restricted_prefers_supplied_candidate_guesses() {
        let ctx = context(&["crane", "slate", "irate"], &["crane", "slate", "irate"])
            .with_candidate_guesses(Some(vec![2]));
        assert_eq!(RestrictedStrategy.guess_universe(&ctx), vec![2]);
        assert_eq!(RestrictedStrategy.next_guess(&ctx).unwrap().guess_index, 2);
    }

    #[test]
    fn empty_universe_has_no_guess() {
        let ctx = context(&["crane"], &["slate"]);
        assert!(matches!(
            RestrictedStrategy.next_guess(&ctx),
            Err(SolverError::NoGuess)
        ));
        assert!(RestrictedStrategy.top_guesses(&ctx, 5).is_empty());
    }

    #[test]
    fn top_guesses_respects_limit() {
        let words = ["crane", "slate", "irate", "crate", "grate", "floor"];
        let ctx = context(&words, &words);
        assert_eq!(FullEntropyStrategy.top_guesses(&ctx, 3).len(), 3);
        assert_eq!(FullEntropyStrategy.top_guesses(&ctx, 100).len(), 6);
        assert!(FullEntropyStrategy.top_guesses(&ctx, 0).is_empty());
    }

    #[test]
    fn end_to_end_three_word_game() {
        let words = ["alpha", "allot", "amigo"];
        let ctx = context(&words, &words);

        let best = RestrictedStrategy.next_guess(&ctx).unwrap();
        assert!(best.guess_index < 3);
        assert!((best.entropy - 3f64.log2()).abs() < 1e-9);

        let secret = &ctx.dictionary.answers()[1];
        let history = [HistoryEntry::new(
            "alpha",
            Feedback::calculate(&ctx.dictionary.guesses()[0], secret),
        )];
        let candidates = filter_indices(ctx.dictionary.answers(), &history);
        assert_eq!(candidates, vec![1]);

        let ctx = ctx.with_candidates(candidates);
        for eval in FullEntropyStrategy.top_guesses(&ctx, 3) {
            assert!(eval.entropy.abs() < f64::EPSILON);
        }
    }
}
