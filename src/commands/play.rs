//! Interactive play mode
//!
//! Text-based REPL: the solver suggests a guess, the user reports the
//! feedback the game showed, repeat until one candidate remains.

use crate::core::Feedback;
use crate::error::SolverError;
use crate::output::formatters::colored_guess;
use crate::solver::entropy::calculate_metrics;
use crate::solver::{GuessEval, HistoryEntry, Solver, Strategy};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// How many ranked guesses are shown each turn
const SHOWN_SUGGESTIONS: usize = 5;

/// What one line of user input did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayEvent {
    /// Feedback recorded; the game continues
    Recorded,
    /// Feedback recorded and only one answer remains
    Solved(String),
    /// Feedback recorded but it rules out every answer
    Inconsistent,
    Undone,
    NothingToUndo,
    Restarted,
    Quit,
    Invalid(String),
}

/// One interactive game against an unknown secret
pub struct PlaySession<'a, S: Strategy> {
    solver: &'a Solver<S>,
    history: Vec<HistoryEntry>,
}

impl<'a, S: Strategy> PlaySession<'a, S> {
    #[must_use]
    pub const fn new(solver: &'a Solver<S>) -> Self {
        Self {
            solver,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[must_use]
    pub fn turn(&self) -> usize {
        self.history.len() + 1
    }

    /// The guess to play now
    ///
    /// # Errors
    /// Returns an exhaustion error if the recorded feedback is inconsistent.
    pub fn suggestion(&self) -> Result<GuessEval, SolverError> {
        self.solver.next_guess(&self.history)
    }

    /// Up to `limit` ranked guesses, best first
    ///
    /// # Errors
    /// Returns an exhaustion error if there is nothing to suggest.
    pub fn suggestions(&self, limit: usize) -> Result<Vec<GuessEval>, SolverError> {
        let ranked = self.solver.top_guesses(&self.history, limit)?;
        if ranked.is_empty() {
            return Err(SolverError::NoGuess);
        }
        Ok(ranked)
    }

    /// Apply one line of input given that `guess` was played
    pub fn handle(&mut self, guess: &str, input: &str) -> PlayEvent {
        let length = self.solver.dictionary().word_length();
        let input = input.trim().to_lowercase();
        if let Some(event) = self.control(&input) {
            return event;
        }
        match input.as_str() {
            "win" | "correct" | "solved" => self.record(guess, Feedback::perfect(length)),
            digits => match Feedback::parse(digits, length) {
                Ok(feedback) => self.record(guess, feedback),
                Err(e) => PlayEvent::Invalid(e.to_string()),
            },
        }
    }

    /// Apply a session command when no guess is on the table
    ///
    /// Only `undo`, `new` and `quit` are accepted; feedback is rejected.
    pub fn handle_command(&mut self, input: &str) -> PlayEvent {
        self.control(&input.trim().to_lowercase())
            .unwrap_or_else(|| PlayEvent::Invalid("expected 'undo', 'new' or 'quit'".to_string()))
    }

    fn control(&mut self, input: &str) -> Option<PlayEvent> {
        let event = match input {
            "quit" | "q" | "exit" => PlayEvent::Quit,
            "new" | "n" => {
                self.history.clear();
                PlayEvent::Restarted
            }
            "undo" | "u" => {
                if self.history.pop().is_some() {
                    PlayEvent::Undone
                } else {
                    PlayEvent::NothingToUndo
                }
            }
            _ => return None,
        };
        Some(event)
    }

    fn record(&mut self, guess: &str, feedback: Feedback) -> PlayEvent {
        self.history.push(HistoryEntry::new(guess, feedback));
        let remaining = self.solver.candidate_words(&self.history);
        match remaining.as_slice() {
            [] => PlayEvent::Inconsistent,
            [answer] => PlayEvent::Solved(answer.text().to_string()),
            _ => PlayEvent::Recorded,
        }
    }
}

/// Run the interactive mode on stdin/stdout
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input.
pub fn run_play<S: Strategy>(solver: &Solver<S>) -> Result<(), SolverError> {
    let length = solver.dictionary().word_length();

    println!("\n{}", "═".repeat(62).bright_cyan());
    println!("{}", "  Wordle Oracle - Interactive Mode".bright_cyan().bold());
    println!("{}", "═".repeat(62).bright_cyan());
    println!("\nAfter each guess, enter the feedback as {length} digits:");
    println!("  2 = 🟩 correct position, 1 = 🟨 wrong position, 0 = ⬜ absent");
    println!("Commands: 'win', 'undo', 'new', 'quit'\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut session = PlaySession::new(solver);

    loop {
        let ranked = match session.suggestions(SHOWN_SUGGESTIONS) {
            Ok(ranked) => ranked,
            Err(e) if e.is_exhaustion() => {
                println!("\n❌ {e}");
                println!("Type 'undo' to go back, or 'new' to start over.\n");
                let Some(line) = prompt(&mut lines, "Command")? else {
                    return Ok(());
                };
                match session.handle_command(&line) {
                    PlayEvent::Quit => return Ok(()),
                    event => report(&event, &session),
                }
                continue;
            }
            Err(e) => return Err(e),
        };

        print_turn(solver, &session, &ranked);
        let word = solver.word(&ranked[0]).text().to_string();

        let Some(line) = prompt(&mut lines, "Feedback")? else {
            return Ok(());
        };
        let event = session.handle(&word, &line);
        report(&event, &session);

        match event {
            PlayEvent::Quit => return Ok(()),
            PlayEvent::Solved(_) => {
                let Some(again) = prompt(&mut lines, "Play again? (yes/no)")? else {
                    return Ok(());
                };
                if !matches!(again.to_lowercase().as_str(), "yes" | "y") {
                    println!("\n👋 Thanks for playing!\n");
                    return Ok(());
                }
                session.handle_command("new");
                println!("\n🔄 New game started!\n");
            }
            _ => {}
        }
    }
}

fn print_turn<S: Strategy>(solver: &Solver<S>, session: &PlaySession<'_, S>, ranked: &[GuessEval]) {
    let best = &ranked[0];
    let candidates = solver.candidate_words(session.history());

    println!("{}", "─".repeat(62));
    println!(
        "Turn {}: {} candidates remaining",
        session.turn(),
        candidates.len()
    );
    println!("{}", "─".repeat(62));

    if let Ok(ctx) = solver.context(session.history()) {
        let mut rows = ctx.rows.create();
        let row = rows.row(solver.word(best), ctx.recompute);
        let metrics = calculate_metrics(&row, &ctx.candidate_answers);

        println!(
            "\n📊 Suggested guess: {}",
            solver.word(best).text().to_uppercase().bright_yellow().bold()
        );
        println!("   Entropy:          {:.3} bits", metrics.entropy);
        println!("   Expected remain:  {:.1} candidates", metrics.expected_remaining);
        println!("   Worst case:       {} candidates", metrics.max_partition);

        if ranked.len() > 1 {
            println!("\n   Alternatives:");
            for eval in &ranked[1..] {
                println!(
                    "     {} ({:.3} bits)",
                    solver.word(eval).text().to_uppercase(),
                    eval.entropy
                );
            }
        }
        println!();
    }

    if candidates.len() <= 10 {
        println!("Remaining candidates:");
        for candidate in &candidates {
            println!("  • {}", candidate.text().to_uppercase());
        }
        println!();
    }
}

fn report<S: Strategy>(event: &PlayEvent, session: &PlaySession<'_, S>) {
    match event {
        PlayEvent::Recorded => {}
        PlayEvent::Solved(answer) => {
            let guesses = session.history().len();
            println!("\n{}", "═".repeat(62).bright_cyan());
            println!(
                "  🎉 Solved in {} {}: {}",
                guesses.to_string().bright_cyan().bold(),
                if guesses == 1 { "guess" } else { "guesses" },
                answer.to_uppercase().bright_green().bold()
            );
            println!("{}", "═".repeat(62).bright_cyan());

            let length = answer.chars().count();
            println!("\n  Guess history:");
            for (i, entry) in session.history().iter().enumerate() {
                println!(
                    "    {}. {} {}",
                    (i + 1).to_string().bright_black(),
                    colored_guess(&entry.guess, entry.feedback, length),
                    entry.feedback.render(length)
                );
            }
            println!();
        }
        PlayEvent::Inconsistent => {
            println!("\n❌ No candidates remain! Your feedback may be incorrect.");
        }
        PlayEvent::Undone => println!("✓ Undone! Back to turn {}\n", session.turn()),
        PlayEvent::NothingToUndo => println!("Nothing to undo!\n"),
        PlayEvent::Restarted => println!("\n🔄 New game started!\n"),
        PlayEvent::Quit => println!("\n👋 Thanks for playing!\n"),
        PlayEvent::Invalid(reason) => println!("❌ Invalid input: {reason}\n"),
    }
}

/// Read one trimmed line; `None` at end of input
fn prompt<B: BufRead>(lines: &mut io::Lines<B>, label: &str) -> Result<Option<String>, SolverError> {
    print!("{label}: ");
    io::stdout().flush()?;
    Ok(lines.next().transpose()?.map(|line| line.trim().to_string()))
}
