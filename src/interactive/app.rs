//! TUI application state and logic

use crate::engine::{Completion, Engine, EngineError};
use crate::progression::Storage;
use crate::session::{Booster, BoosterEffect, GameSession, GameStatus, SessionError};
use crate::wordlists::Dictionary;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Application state
pub struct App<D: Dictionary, S: Storage> {
    pub engine: Engine<D, S>,
    pub session: GameSession,
    pub messages: Vec<Message>,
    /// Reward summary of the finished session, if it has been recorded
    pub completion: Option<Completion>,
    pub should_quit: bool,
}

impl<D: Dictionary, S: Storage> App<D, S> {
    /// Start the app on a fresh session at the player's level
    ///
    /// # Errors
    /// Fails if no secret word can be drawn.
    pub fn new(mut engine: Engine<D, S>) -> Result<Self, EngineError> {
        let session = engine.start_session()?;
        let mut app = Self {
            engine,
            session,
            messages: Vec::new(),
            completion: None,
            should_quit: false,
        };
        app.add_message(
            &format!("Level {}: guess the five-letter word!", app.session.level()),
            MessageStyle::Info,
        );
        Ok(app)
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    fn report(&mut self, err: &EngineError) {
        if let EngineError::Store(_) = err {
            warn!(error = %err, "progress not saved");
        }
        self.add_message(&err.to_string(), MessageStyle::Error);
    }

    /// Dispatch a single key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc => self.should_quit = true,
            _ if self.session.status().is_over() => match key.code {
                KeyCode::Enter | KeyCode::Char('n' | 'N') => self.next_level(),
                KeyCode::Char('q' | 'Q') => self.should_quit = true,
                _ => {}
            },
            KeyCode::Char('1') => self.use_booster(Booster::Dart),
            KeyCode::Char('2') => self.use_booster(Booster::Hint),
            KeyCode::Char('3') => self.use_booster(Booster::Skip),
            KeyCode::Char(c) => {
                if let Err(err) = self.session.append_letter(c) {
                    // Typing past the end of the row is not worth a message
                    if err != SessionError::RowFull {
                        self.add_message(&err.to_string(), MessageStyle::Error);
                    }
                }
            }
            KeyCode::Backspace => {
                if let Err(err) = self.session.backspace() {
                    // An empty row is not worth a message either
                    if err != SessionError::NothingToErase {
                        self.add_message(&err.to_string(), MessageStyle::Error);
                    }
                }
            }
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    pub fn submit(&mut self) {
        match self.engine.submit(&mut self.session) {
            Ok(_) => self.finish_if_over(),
            Err(err) => self.report(&err),
        }
    }

    pub fn use_booster(&mut self, booster: Booster) {
        match self.engine.use_booster(&mut self.session, booster) {
            Ok(effect) => {
                let text = match effect {
                    BoosterEffect::Eliminated(letters) => {
                        let letters: Vec<String> = letters.iter().map(char::to_string).collect();
                        format!("🎯 Dart removed {}", letters.join(", "))
                    }
                    BoosterEffect::Revealed { column, letter } => {
                        format!("💡 Column {} is {letter}", column + 1)
                    }
                    BoosterEffect::Skipped => "⏭ Level skipped".to_string(),
                };
                self.add_message(&text, MessageStyle::Success);
                self.finish_if_over();
            }
            Err(err) => {
                self.report(&err);
                // A failed save still applied the effect
                self.finish_if_over();
            }
        }
    }

    fn finish_if_over(&mut self) {
        if !self.session.status().is_over() || self.completion.is_some() {
            return;
        }

        match self.engine.complete(&mut self.session) {
            Ok(completion) => {
                self.completion = Some(completion);
                let text = if self.session.skipped() {
                    "Skipped. No coins for this one.".to_string()
                } else if self.session.status() == GameStatus::Won {
                    format!(
                        "Solved in {}! +{} coins",
                        self.session.current_row() + 1,
                        completion.coins_earned
                    )
                } else {
                    format!("Out of guesses. The word was {}", self.session.secret())
                };
                self.add_message(&text, MessageStyle::Success);
                self.add_message("Press Enter for the next level", MessageStyle::Info);
            }
            Err(EngineError::Session(SessionError::AlreadyReported)) => {}
            Err(err) => self.report(&err),
        }
    }

    pub fn next_level(&mut self) {
        if let Err(err) = self.engine.store_mut().flush() {
            warn!(error = %err, "progress still unsaved");
        }
        match self.engine.start_session() {
            Ok(session) => {
                self.session = session;
                self.completion = None;
                self.messages.clear();
                self.add_message(
                    &format!("Level {}: guess the five-letter word!", self.session.level()),
                    MessageStyle::Info,
                );
            }
            Err(err) => self.report(&err),
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<D: Dictionary, S: Storage>(app: App<D, S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend, D: Dictionary, S: Storage>(
    terminal: &mut Terminal<B>,
    mut app: App<D, S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    app.engine.store_mut().flush()?;
    Ok(())
}
