//! Display functions for command results

use super::formatters::{colored_guess, entropy_bar};
use crate::commands::{
    AnalysisResult, PrecomputeResult, SimulationStatistics, SolveResult, SuggestionReport,
};
use colored::Colorize;

/// Print the result of solving a word
pub fn print_solve_result(result: &SolveResult, length: usize, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Solving: {}",
        result.secret.to_uppercase().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.steps.iter().enumerate() {
        println!(
            "\nTurn {}: {} {} ({})",
            i + 1,
            colored_guess(&step.word, step.feedback, length),
            step.feedback.render(length),
            step.feedback.digits(length)
        );

        if verbose {
            println!(
                "  Candidates: {} → {}",
                step.candidates_before, step.candidates_after
            );
            println!("  Entropy:    {:.3} bits", step.entropy);

            if step.candidates_after > 0 {
                let ratio = step.candidates_before as f64 / step.candidates_after as f64;
                println!("  Info gained: {:.3} bits ({ratio:.1}x reduction)", ratio.log2());
            }
        }
    }

    println!();
    if result.success {
        let last = result.steps.last().map(|s| s.word.as_str());
        if last != Some(result.secret.as_str()) {
            println!(
                "Only {} remains; guessing it takes one more turn.",
                result.secret.to_uppercase().bright_green()
            );
        }
        println!(
            "{}",
            format!("✅ Solved in {} turns!", result.rounds)
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!(
                "❌ Failed after {} turns: {}",
                result.rounds,
                result.failure.as_deref().unwrap_or("unknown reason")
            )
            .red()
            .bold()
        );
    }
}

/// Print the result of word analysis
pub fn print_analysis_result(result: &AnalysisResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "ENTROPY ANALYSIS:".bright_cyan().bold(),
        result.word.to_uppercase().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    let bar = entropy_bar(result.entropy, result.total_candidates, 30);

    println!("\n📊 Against {} possible answers:", result.total_candidates);
    println!(
        "   Entropy:     [{}] {}",
        bar.green(),
        format!("{:.3} bits", result.entropy).bright_yellow()
    );
    println!(
        "   Info gain:   {:.1}x reduction",
        result.expected_reduction
    );
    println!(
        "   Expected:    {:.1} candidates remain",
        result.expected_remaining
    );
    println!("   Worst case:  {} candidates remain", result.worst_case);
    println!(
        "   Can win:     {}",
        if result.is_candidate {
            "yes".green()
        } else {
            "no".yellow()
        }
    );
}

/// Print ranked suggestions
pub fn print_suggestions(report: &SuggestionReport) {
    println!(
        "\n{} candidate{} remaining",
        report.candidate_count.to_string().bright_cyan().bold(),
        if report.candidate_count == 1 { "" } else { "s" }
    );

    for (i, suggestion) in report.suggestions.iter().enumerate() {
        let bar = entropy_bar(suggestion.entropy, report.candidate_count, 20);
        println!(
            "  {:>2}. {:<12} [{}] {:.3} bits",
            i + 1,
            suggestion.word.to_uppercase(),
            bar.green(),
            suggestion.entropy
        );
    }
}

/// Print precompute totals
pub fn print_precompute_result(result: &PrecomputeResult) {
    println!(
        "\n✅ Precomputed {} rows of {} codes in {:.2}s",
        result.rows.to_string().bright_yellow().bold(),
        result.answers,
        result.duration.as_secs_f64()
    );
}

/// Print simulation statistics
pub fn print_simulation_statistics(stats: &SimulationStatistics) {
    println!("\n{}", "═".repeat(70));
    println!(" Simulation Summary ");
    println!("{}", "═".repeat(70));

    println!("\n📊 {}", "Overall Performance".bright_cyan().bold());
    println!("  Strategy:            {}", stats.strategy);
    println!("  Secrets processed:   {}", stats.processed);
    if stats.processed == 0 {
        println!("  Nothing to do.");
        return;
    }

    let share = |n: usize| n as f64 / stats.processed as f64 * 100.0;
    println!(
        "  Solved:              {} {}",
        stats.solved,
        format!("({:.1}%)", share(stats.solved)).green()
    );
    if !stats.failures.is_empty() {
        println!(
            "  Failures:            {} {}",
            stats.failures.len(),
            format!("({:.1}%)", share(stats.failures.len())).red()
        );
    }
    if stats.solved > 0 {
        println!(
            "  Average turns:       {}",
            format!("{:.3}", stats.average_rounds).bright_yellow().bold()
        );
    }
    if let Some((secret, rounds)) = &stats.longest {
        println!(
            "  Longest solve:       {rounds} turn{} ({})",
            if *rounds == 1 { "" } else { "s" },
            secret.to_uppercase()
        );
    }
    println!("  Elapsed time:        {:.2}s", stats.elapsed.as_secs_f64());

    println!("\n📈 {}", "Round Distribution".bright_cyan().bold());
    if stats.distribution.is_empty() {
        println!("  (no successful solves)");
    }
    let max_count = stats.distribution.values().copied().max().unwrap_or(1);
    for (rounds, count) in &stats.distribution {
        let bar_len = (count * 40 / max_count).max(usize::from(*count > 0));
        let bar = format!(
            "{}{}",
            "█".repeat(bar_len).green(),
            "░".repeat(40_usize.saturating_sub(bar_len)).bright_black()
        );
        println!(
            "  {rounds:>2} turns: {bar} {count:4} ({:5.1}%)",
            *count as f64 / stats.solved as f64 * 100.0
        );
    }

    if !stats.failures.is_empty() {
        println!("\n😰 {}", "Failures".yellow().bold());
        for (secret, reason) in &stats.failures {
            println!("  {} -> {reason}", secret.to_uppercase().yellow());
        }
    }
}
