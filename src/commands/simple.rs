//! Simple interactive CLI mode
//!
//! Line-based game without the TUI

use crate::core::WORD_LENGTH;
use crate::engine::{Engine, EngineError};
use crate::output::{print_board, print_completion};
use crate::progression::Storage;
use crate::session::{Booster, BoosterEffect, GameSession, SessionError};
use crate::wordlists::Dictionary;
use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};

/// One line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineInput {
    Guess(String),
    Booster(Booster),
    Help,
    Quit,
}

impl LineInput {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim().to_lowercase();
        match line.as_str() {
            "quit" | "q" | "exit" => Self::Quit,
            "help" | "?" => Self::Help,
            "!dart" | "!1" => Self::Booster(Booster::Dart),
            "!hint" | "!2" => Self::Booster(Booster::Hint),
            "!skip" | "!3" => Self::Booster(Booster::Skip),
            _ => Self::Guess(line),
        }
    }
}

/// Replace the current row with `text`, keeping locked columns
///
/// Letters typed over a locked column must match the revealed letter, so the
/// player can type the whole word including revealed letters. The row is
/// left untouched when any letter is rejected.
///
/// # Errors
/// `InvalidLength` unless `text` has five letters, `LockedColumn` when a
/// letter contradicts a revealed one, or any rejection from
/// [`GameSession::append_letter`].
pub fn enter_word(session: &mut GameSession, text: &str) -> Result<(), SessionError> {
    let length = text.chars().count();
    if length != WORD_LENGTH {
        return Err(SessionError::InvalidLength(length));
    }
    if session.status().is_over() {
        return Err(SessionError::GameOver);
    }

    for (column, letter) in text.chars().enumerate() {
        if session.is_locked(column) {
            let locked = char::from(session.secret().char_at(column));
            if !letter.eq_ignore_ascii_case(&locked) {
                return Err(SessionError::LockedColumn {
                    column,
                    letter: locked,
                });
            }
        } else if !letter.is_ascii_alphabetic() {
            return Err(SessionError::InvalidLetter(letter));
        } else if session.is_eliminated(letter) {
            return Err(SessionError::LetterEliminated(letter.to_ascii_uppercase()));
        }
    }

    while session.backspace().is_ok() {}
    for (column, letter) in text.chars().enumerate() {
        if session.is_locked(column) {
            continue;
        }
        session.append_letter(letter)?;
    }
    Ok(())
}

fn print_help<D: Dictionary, S: Storage>(engine: &Engine<D, S>) {
    let costs = engine.store().config().booster_costs;
    println!("Type a five-letter word and press Enter.");
    println!("Boosters:");
    for booster in Booster::ALL {
        println!("  !{:<5} {:>3} coins", booster.name(), booster.cost(&costs));
    }
    println!("Commands: 'quit' to exit, 'help' for this text\n");
}

fn describe(effect: &BoosterEffect) -> String {
    match effect {
        BoosterEffect::Eliminated(letters) => {
            let letters: Vec<String> = letters.iter().map(char::to_string).collect();
            format!("🎯 Removed {}", letters.join(", "))
        }
        BoosterEffect::Revealed { column, letter } => {
            format!("💡 Column {} is {letter}", column + 1)
        }
        BoosterEffect::Skipped => "⏭  Skipped".to_string(),
    }
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input or if no
/// secret word can be drawn.
pub fn run_simple<D: Dictionary, S: Storage>(engine: &mut Engine<D, S>) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Wordle Mini - Line Mode                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print_help(engine);

    loop {
        let mut session = engine.start_session()?;
        println!(
            "{}",
            format!(
                "Level {}   💰 {} coins",
                session.level(),
                engine.store().coins()
            )
            .bright_cyan()
            .bold()
        );

        while !session.status().is_over() {
            print_board(&session.snapshot());
            let input = get_user_input("Guess")?;

            let result = match LineInput::parse(&input) {
                LineInput::Quit => {
                    engine.store_mut().flush()?;
                    println!("\n👋 Thanks for playing!\n");
                    return Ok(());
                }
                LineInput::Help => {
                    print_help(engine);
                    continue;
                }
                LineInput::Booster(booster) => engine
                    .use_booster(&mut session, booster)
                    .map(|effect| println!("{}", describe(&effect).green())),
                LineInput::Guess(word) => enter_word(&mut session, &word)
                    .map_err(EngineError::from)
                    .and_then(|()| engine.submit(&mut session).map(|_| ())),
            };

            if let Err(err) = result {
                println!("{}", format!("❌ {err}").red());
            }
        }

        print_board(&session.snapshot());
        match engine.complete(&mut session) {
            Ok(completion) => print_completion(&session.snapshot(), &completion),
            Err(err) => println!("{}", format!("❌ {err}").red()),
        }

        match get_user_input("Next level? (yes/no)")?.to_lowercase().as_str() {
            "yes" | "y" | "" => println!(),
            _ => {
                engine.store_mut().flush()?;
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
        }
    }
}

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> io::Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
