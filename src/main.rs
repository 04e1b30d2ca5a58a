//! Wordle Oracle - CLI
//!
//! Entropy-ranked guess recommendations with a persistent pattern cache.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wordle_oracle::{
    commands::{
        SimulationRange, SolveConfig, analyze_word, run_play, run_precompute, run_simulation,
        solve_word, suggest,
    },
    core::Dictionary,
    output::{
        print_analysis_result, print_precompute_result, print_simulation_statistics,
        print_solve_result, print_suggestions,
    },
    patterns::RowSourceFactory,
    solver::{HistoryEntry, Solver, Strategy, StrategyType},
    wordlists::load_from_file,
};

#[derive(Parser)]
#[command(
    name = "wordle_oracle",
    about = "Entropy-ranked Wordle guesses for any word length, with a persistent pattern cache",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Answer list: one word per line
    #[arg(short, long)]
    answers: PathBuf,

    /// Guess list (defaults to the answer list)
    #[arg(short, long)]
    guesses: Option<PathBuf>,

    /// Directory for the durable pattern cache (in-memory rows when absent)
    #[arg(short, long)]
    cache_dir: Option<PathBuf>,

    /// Ranking workers, 0 for one per core
    #[arg(short, long, default_value = "0")]
    workers: usize,

    /// Ignore cached rows and rebuild them
    #[arg(long)]
    recompute: bool,

    /// Strategy: restricted (default) or full
    #[arg(short, long, default_value = "restricted")]
    strategy: String,

    /// Restrict the guess universe to guesses consistent with the history
    #[arg(long)]
    filter_guesses: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mode (default)
    Play,

    /// Play a full game against a known secret
    Solve {
        /// The secret word
        secret: String,

        /// Show candidate counts and information gained per turn
        #[arg(short, long)]
        verbose: bool,
    },

    /// Rank guesses for a history
    Suggest {
        /// Played turn as WORD:DIGITS, e.g. crane:00102 (repeatable)
        #[arg(long = "history", value_name = "WORD:DIGITS")]
        history: Vec<String>,

        /// Number of suggestions
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fill the pattern cache with every guess's row
    Precompute,

    /// Solve every answer (or a slice of them) and report statistics
    Simulate {
        /// Index of the first answer to simulate
        #[arg(long, default_value = "0")]
        start: usize,

        /// Number of answers to simulate
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Analyze one guess against the current candidates
    Analyze {
        /// Word to analyze
        word: String,

        /// Played turn as WORD:DIGITS (repeatable)
        #[arg(long = "history", value_name = "WORD:DIGITS")]
        history: Vec<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let dictionary = Arc::new(load_dictionary(&cli.answers, cli.guesses.as_deref())?);
    log::info!(
        "loaded {} guesses and {} answers of length {} (signature {})",
        dictionary.guesses().len(),
        dictionary.answers().len(),
        dictionary.word_length(),
        dictionary.hash()
    );

    let pattern_root = cli.cache_dir.as_ref().map(|dir| dir.join("patterns"));
    let (rows, cache) = RowSourceFactory::for_cache_dir(&dictionary, pattern_root.as_deref());

    let solver = Solver::new(
        StrategyType::from_name(&cli.strategy),
        Arc::clone(&dictionary),
        rows.clone(),
    )
    .with_workers(cli.workers)
    .with_recompute(cli.recompute)
    .with_guess_filtering(cli.filter_guesses);

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    let outcome = match command {
        Commands::Play => run_play(&solver).context("interactive session failed"),
        Commands::Solve { secret, verbose } => solve_command(&solver, &secret, verbose),
        Commands::Suggest {
            history,
            limit,
            json,
        } => suggest_command(&solver, &history, limit, json),
        Commands::Precompute => {
            let mut source = rows.create();
            let result = run_precompute(&dictionary, &mut *source, cli.recompute);
            print_precompute_result(&result);
            Ok(())
        }
        Commands::Simulate { start, limit } => {
            simulate_command(&solver, SimulationRange { start, limit })
        }
        Commands::Analyze { word, history } => analyze_command(&solver, &word, &history),
    };

    if let Some(cache) = cache {
        cache.flush().context("failed to flush the pattern cache")?;
    }
    outcome
}

/// Load both word lists into a validated dictionary
fn load_dictionary(answers: &Path, guesses: Option<&Path>) -> Result<Dictionary> {
    let answer_words = load_from_file(answers)
        .with_context(|| format!("failed to read answers from {}", answers.display()))?;
    let guess_words = match guesses {
        Some(path) => load_from_file(path)
            .with_context(|| format!("failed to read guesses from {}", path.display()))?,
        None => answer_words.clone(),
    };

    Dictionary::new(&guess_words, &answer_words).context("invalid word lists")
}

fn parse_history(raw: &[String], length: usize) -> Result<Vec<HistoryEntry>> {
    raw.iter()
        .map(|entry| {
            HistoryEntry::parse(entry, length).with_context(|| format!("invalid history entry '{entry}'"))
        })
        .collect()
}

fn solve_command<S: Strategy>(solver: &Solver<S>, secret: &str, verbose: bool) -> Result<()> {
    let length = solver.dictionary().word_length();
    let config = SolveConfig::new(secret, length);
    let result = solve_word(&config, solver)?;

    print_solve_result(&result, length, verbose);
    Ok(())
}

fn suggest_command<S: Strategy>(
    solver: &Solver<S>,
    history: &[String],
    limit: usize,
    json: bool,
) -> Result<()> {
    let history = parse_history(history, solver.dictionary().word_length())?;
    let report = suggest(solver, &history, limit)?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        print_suggestions(&report);
    }
    Ok(())
}

fn simulate_command<S: Strategy>(solver: &Solver<S>, range: SimulationRange) -> Result<()> {
    let total = solver.dictionary().answers().len();
    let (start, end) = range.bounds(total);
    if start >= end {
        log::warn!("nothing to simulate (start={start}, limit={:?})", range.limit);
    }

    println!("\n{}", "═".repeat(70));
    println!(" Wordle Auto Simulation ");
    println!("{}", "═".repeat(70));
    println!("\nStrategy: {}", solver.strategy().name());
    println!("Secrets:  {start}..{end} of {total}\n");

    let stats = run_simulation(solver, range)?;
    print_simulation_statistics(&stats);
    Ok(())
}

fn analyze_command<S: Strategy>(solver: &Solver<S>, word: &str, history: &[String]) -> Result<()> {
    let history = parse_history(history, solver.dictionary().word_length())?;
    let result = analyze_word(word, &history, solver)?;
    print_analysis_result(&result);
    Ok(())
}
