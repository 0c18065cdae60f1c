//! TUI rendering with ratatui
//!
//! Everything here is drawn from a `SessionSnapshot` and the store's
//! read-only state; no scoring happens at render time.

use super::app::{App, MessageStyle};
use crate::core::{KeyboardStatus, LetterVerdict, WORD_LENGTH};
use crate::output::formatters::format_time;
use crate::progression::Storage;
use crate::session::{Booster, GameStatus, MAX_ROWS, SessionSnapshot};
use crate::wordlists::Dictionary;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// Main UI rendering function
pub fn ui<D: Dictionary, S: Storage>(f: &mut Frame, app: &App<D, S>) {
    let snapshot = app.session.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Board and side panel
            Constraint::Length(5), // Keyboard
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, &snapshot, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_board(f, &snapshot, main_chunks[0]);
    render_side_panel(f, app, main_chunks[1]);
    render_keyboard(f, &snapshot.keyboard, &snapshot.eliminated, chunks[2]);
    render_status(f, &snapshot, chunks[3]);
}

fn verdict_style(verdict: LetterVerdict) -> Style {
    let bg = match verdict {
        LetterVerdict::Correct => Color::Green,
        LetterVerdict::Present => Color::Yellow,
        LetterVerdict::Absent => Color::DarkGray,
    };
    Style::new().fg(Color::Black).bg(bg).add_modifier(Modifier::BOLD)
}

fn render_header<D: Dictionary, S: Storage>(
    f: &mut Frame,
    app: &App<D, S>,
    snapshot: &SessionSnapshot,
    area: Rect,
) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "🎯 WORDLE MINI",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   Level {}   ", snapshot.level)),
        Span::styled(
            format!("💰 {}", app.engine.store().coins()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

/// One line per guess row: submitted, being typed, or empty
fn board_lines(snapshot: &SessionSnapshot) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(MAX_ROWS);

    for row in &snapshot.rows {
        let spans: Vec<Span> = row
            .guess
            .text()
            .chars()
            .zip(row.feedback.verdicts())
            .map(|(letter, &verdict)| Span::styled(format!(" {letter} "), verdict_style(verdict)))
            .flat_map(|tile| [tile, Span::raw(" ")])
            .collect();
        lines.push(Line::from(spans));
    }

    if !snapshot.status.is_over() {
        let spans: Vec<Span> = snapshot
            .preview
            .iter()
            .enumerate()
            .map(|(column, cell)| match cell {
                Some(letter) if snapshot.locked.contains(&column) => Span::styled(
                    format!("[{letter}]"),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Some(letter) => Span::styled(
                    format!("[{letter}]"),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                None => Span::styled("[ ]", Style::default().fg(Color::Gray)),
            })
            .flat_map(|tile| [tile, Span::raw(" ")])
            .collect();
        lines.push(Line::from(spans));
    }

    while lines.len() < MAX_ROWS {
        let empty = Span::styled("[ ] ".repeat(WORD_LENGTH), Style::default().fg(Color::DarkGray));
        lines.push(Line::from(empty));
    }
    lines
}

fn render_board(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let mut lines = vec![Line::from("")];
    for line in board_lines(snapshot) {
        lines.push(line);
        lines.push(Line::from(""));
    }

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_side_panel<D: Dictionary, S: Storage>(f: &mut Frame, app: &App<D, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(4)])
        .split(area);

    render_progress(f, app, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_progress<D: Dictionary, S: Storage>(f: &mut Frame, app: &App<D, S>, area: Rect) {
    let store = app.engine.store();
    let state = store.state();
    let costs = store.config().booster_costs;

    let mut lines = vec![
        Line::from(format!("Best level: {}", state.max_level)),
        Line::from(format!("Best score: {}", state.max_score)),
        Line::from(format!("Best time:  {}", format_time(state.max_time_ms))),
        Line::from(""),
    ];
    for (key, booster) in Booster::ALL.into_iter().enumerate() {
        let cost = booster.cost(&costs);
        let style = if store.coins() >= cost {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::styled(
            format!("{}: {:<5} {cost:>3} coins", key + 1, booster.name()),
            style,
        ));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" Progress ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(panel, area);
}

fn render_messages<D: Dictionary, S: Storage>(f: &mut Frame, app: &App<D, S>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));
    f.render_widget(messages_list, area);
}

fn render_keyboard(f: &mut Frame, keyboard: &KeyboardStatus, eliminated: &[char], area: Rect) {
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|keys| {
            let spans: Vec<Span> = keys
                .chars()
                .map(|key| {
                    if eliminated.contains(&key) {
                        return Span::styled(" · ", Style::default().fg(Color::DarkGray));
                    }
                    match keyboard.get(key) {
                        Some(verdict) => Span::styled(format!(" {key} "), verdict_style(verdict)),
                        None => Span::raw(format!(" {key} ")),
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn render_status(f: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let (text, color) = match snapshot.status {
        GameStatus::Playing => (
            "Type letters | Enter: Submit | Backspace: Erase | 1-3: Boosters | Esc: Quit".to_string(),
            Color::DarkGray,
        ),
        GameStatus::Won => (
            "🎉 Solved! | Enter/n: Next level | q: Quit".to_string(),
            Color::Green,
        ),
        GameStatus::Lost => (
            format!(
                "The word was {} | Enter/n: Retry level | q: Quit",
                snapshot
                    .answer
                    .as_ref()
                    .map_or_else(String::new, ToString::to_string)
            ),
            Color::Red,
        ),
    };

    let status = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Double));
    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::Word;
    use crate::engine::Engine;
    use crate::progression::{MemoryStorage, ProgressionStore};
    use crate::session::GameSession;
    use crate::wordlists::WordList;
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App<WordList, MemoryStorage> {
        let dictionary = WordList::new(vec![Word::new("CRANE").unwrap()], []);
        let store = ProgressionStore::load(MemoryStorage::new(), GameConfig::default()).unwrap();
        App::new(Engine::new(dictionary, store, Some(9))).unwrap()
    }

    #[test]
    fn board_always_has_six_lines() {
        let session = GameSession::new(Word::new("CRANE").unwrap(), 1);
        assert_eq!(board_lines(&session.snapshot()).len(), MAX_ROWS);
    }

    #[test]
    fn draws_header_with_level_and_coins() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Level 1"));
        assert!(screen.contains("100"));
    }
}
