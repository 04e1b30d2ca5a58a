//! Word solving command
//!
//! Plays a full game against a known secret and returns the solution path.

use crate::core::Feedback;
use crate::error::SolverError;
use crate::solver::{HistoryEntry, Solver, Strategy};

/// Configuration for solving a word
pub struct SolveConfig {
    pub secret: String,
    pub max_turns: usize,
}

impl SolveConfig {
    /// Allow `word_length + 3` turns, as the simulation does
    #[must_use]
    pub fn new(secret: impl Into<String>, word_length: usize) -> Self {
        Self {
            secret: secret.into(),
            max_turns: word_length + 3,
        }
    }
}

/// Result of solving a word
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub secret: String,
    pub steps: Vec<GuessStep>,
    pub success: bool,
    /// Turns needed; an answer found by elimination costs one more turn
    pub rounds: usize,
    pub failure: Option<String>,
}

/// A single guess step in the solution
#[derive(Debug, Clone)]
pub struct GuessStep {
    pub word: String,
    pub entropy: f64,
    pub feedback: Feedback,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

impl SolveResult {
    fn failed(secret: String, steps: Vec<GuessStep>, rounds: usize, reason: String) -> Self {
        Self {
            secret,
            steps,
            success: false,
            rounds,
            failure: Some(reason),
        }
    }
}

/// Solve a specific secret using the given solver
///
/// The game ends successfully when the guess equals the secret, or when the
/// candidate set collapses to the secret alone. Running out of candidates or
/// guesses, or exceeding the turn limit, ends it as a failure.
///
/// # Errors
///
/// Returns `SolverError::UnknownSecret` if the secret is not in the answer
/// list.
pub fn solve_word<S: Strategy>(
    config: &SolveConfig,
    solver: &Solver<S>,
) -> Result<SolveResult, SolverError> {
    let dictionary = solver.dictionary();
    let secret_text = config.secret.trim().to_lowercase();
    let secret_index = dictionary
        .answer_position(&secret_text)
        .ok_or_else(|| SolverError::UnknownSecret(config.secret.clone()))?;
    let secret = &dictionary.answers()[secret_index];

    let mut history: Vec<HistoryEntry> = Vec::new();
    let mut steps: Vec<GuessStep> = Vec::new();
    let mut candidates_before = dictionary.answers().len();

    for turn in 1..=config.max_turns {
        let eval = match solver.next_guess(&history) {
            Ok(eval) => eval,
            Err(e) if e.is_exhaustion() => {
                return Ok(SolveResult::failed(secret_text, steps, turn - 1, e.to_string()));
            }
            Err(e) => return Err(e),
        };

        let guess = solver.word(&eval);
        let feedback = Feedback::calculate(guess, secret);
        history.push(HistoryEntry::new(guess.text(), feedback));

        let remaining = solver.candidates(&history);
        steps.push(GuessStep {
            word: guess.text().to_string(),
            entropy: eval.entropy,
            feedback,
            candidates_before,
            candidates_after: remaining.len(),
        });
        candidates_before = remaining.len();

        if guess.text() == secret.text() {
            return Ok(SolveResult {
                secret: secret_text,
                steps,
                success: true,
                rounds: turn,
                failure: None,
            });
        }

        if remaining == [secret_index] {
            return Ok(SolveResult {
                secret: secret_text,
                steps,
                success: true,
                rounds: turn + 1,
                failure: None,
            });
        }

        if remaining.is_empty() {
            return Ok(SolveResult::failed(
                secret_text,
                steps,
                turn,
                SolverError::NoCandidates.to_string(),
            ));
        }
    }

    let rounds = steps.len();
    let reason = format!("exceeded maximum of {} turns", config.max_turns);
    Ok(SolveResult::failed(secret_text, steps, rounds, reason))
}
