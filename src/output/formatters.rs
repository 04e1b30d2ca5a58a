//! Formatting utilities for terminal output

use crate::core::{Feedback, Mark};
use colored::Colorize;

/// Render a guess as colored tiles, one per letter
#[must_use]
pub fn colored_guess(word: &str, feedback: Feedback, length: usize) -> String {
    word.chars()
        .zip(feedback.decode(length))
        .map(|(letter, mark)| {
            let tile = format!(" {} ", letter.to_uppercase());
            match mark {
                Mark::Correct => tile.black().on_green().to_string(),
                Mark::Present => tile.black().on_yellow().to_string(),
                Mark::Absent => tile.white().on_bright_black().to_string(),
            }
        })
        .collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).clamp(0.0, 1.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Entropy as a bar scaled to the best possible split of `candidates`
#[must_use]
pub fn entropy_bar(entropy: f64, candidates: usize, width: usize) -> String {
    let max_entropy = (candidates.max(1) as f64).log2();
    create_progress_bar(entropy, max_entropy, width)
}
