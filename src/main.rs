//! Wordle Mini - CLI
//!
//! Level-based Wordle with coins and boosters, in a TUI or line mode.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use wordle_mini::{
    commands::{run_history, run_simple, run_stats},
    config::GameConfig,
    engine::Engine,
    logging,
    progression::{JsonFileStorage, ProgressionStore},
    wordlists::{ALLOWED_EXTRA, ANSWERS, WordList, loader::words_from_slice},
};

#[derive(Parser)]
#[command(
    name = "wordle_mini",
    about = "Level-based Wordle with coins and boosters",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Progression save file (default: <data dir>/wordle_mini/progress.json)
    #[arg(long, global = true, env = "WORDLE_MINI_SAVE")]
    save: Option<PathBuf>,

    /// Seed for secret words and boosters (reproducible games)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Wordlist: 'answers' (default, embedded) or path to a file of secret words
    #[arg(short = 'w', long, global = true, default_value = "answers")]
    wordlist: String,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log file (default: <data dir>/wordle_mini/wordle_mini.log)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI game (default)
    Play,

    /// Simple line mode without the TUI
    Simple,

    /// Show coins, levels and records
    Stats,

    /// Show recently played games
    History {
        /// Number of games to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
}

/// Build the dictionary for the -w flag
///
/// - "answers": embedded answers as secrets, embedded answers + extras as guesses
/// - "<path>": file words as secrets; the embedded lists stay valid guesses
fn load_wordlist(wordlist_mode: &str) -> Result<WordList> {
    use wordle_mini::wordlists::loader::load_from_file;

    match wordlist_mode {
        "answers" => Ok(WordList::embedded()),
        path => {
            let custom = load_from_file(path)
                .with_context(|| format!("Failed to read wordlist {path}"))?;
            if custom.is_empty() {
                bail!("Wordlist {path} contains no five-letter words");
            }
            let guesses = words_from_slice(ANSWERS)
                .into_iter()
                .chain(words_from_slice(ALLOWED_EXTRA));
            Ok(WordList::new(custom, guesses))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.unwrap_or_else(logging::default_log_path);
    logging::init(&cli.log_level, &log_file)?;

    let save_path = cli.save.unwrap_or_else(JsonFileStorage::default_path);
    let storage = JsonFileStorage::new(&save_path);
    let store = ProgressionStore::load(storage, GameConfig::default())
        .with_context(|| format!("Failed to load progress from {}", save_path.display()))?;
    debug!(path = %save_path.display(), "progress loaded");

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let dictionary = load_wordlist(&cli.wordlist)?;
            info!(
                answers = dictionary.answer_count(),
                allowed = dictionary.allowed_count(),
                "starting TUI"
            );
            run_play_command(Engine::new(dictionary, store, cli.seed))
        }
        Commands::Simple => {
            let dictionary = load_wordlist(&cli.wordlist)?;
            info!(
                answers = dictionary.answer_count(),
                allowed = dictionary.allowed_count(),
                "starting line mode"
            );
            let mut engine = Engine::new(dictionary, store, cli.seed);
            run_simple(&mut engine)
        }
        Commands::Stats => {
            let summary = run_stats(&store);
            debug!(?summary, "stats shown");
            Ok(())
        }
        Commands::History { limit } => {
            run_history(store.state(), limit);
            Ok(())
        }
    }
}

fn run_play_command(engine: Engine<WordList, JsonFileStorage>) -> Result<()> {
    use wordle_mini::interactive::{App, run_tui};

    let app = App::new(engine)?;
    run_tui(app)
}
