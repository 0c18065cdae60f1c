//! Display functions for the line-mode game and reports

use super::formatters::{
    create_progress_bar, feedback_summary, format_time, row_label, win_rate,
};
use crate::core::{KeyboardStatus, LetterVerdict};
use crate::engine::Completion;
use crate::progression::{GameRecord, ProgressionState};
use crate::session::{GameStatus, MAX_ROWS, Row, SessionSnapshot};
use colored::{ColoredString, Colorize};

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

fn tile(letter: char, verdict: LetterVerdict) -> ColoredString {
    let text = format!(" {letter} ");
    match verdict {
        LetterVerdict::Correct => text.black().on_green().bold(),
        LetterVerdict::Present => text.black().on_yellow().bold(),
        LetterVerdict::Absent => text.white().on_bright_black(),
    }
}

/// Print a submitted row as colored tiles
pub fn print_row(index: usize, row: &Row) {
    let tiles: String = row
        .guess
        .text()
        .chars()
        .zip(row.feedback.verdicts())
        .map(|(letter, &verdict)| tile(letter, verdict).to_string())
        .collect();
    let summary = feedback_summary(row.feedback.count_correct(), row.feedback.count_present());
    println!(
        "  {} {tiles}  {}  {}",
        row_label(index, MAX_ROWS).bright_black(),
        row.feedback.to_emoji(),
        summary.bright_black()
    );
}

/// Print the row being typed; locked letters are highlighted
pub fn print_preview(snapshot: &SessionSnapshot) {
    let cells: String = snapshot
        .preview
        .iter()
        .enumerate()
        .map(|(column, cell)| match cell {
            Some(letter) if snapshot.locked.contains(&column) => {
                format!(" {letter} ").black().on_green().to_string()
            }
            Some(letter) => format!(" {letter} ").bold().to_string(),
            None => " _ ".bright_black().to_string(),
        })
        .collect();
    println!(
        "  {} {cells}",
        row_label(snapshot.current_row, MAX_ROWS).bright_cyan()
    );
}

/// Print the on-screen keyboard with letter states
pub fn print_keyboard(keyboard: &KeyboardStatus, eliminated: &[char]) {
    println!();
    for (indent, keys) in KEYBOARD_ROWS.iter().enumerate() {
        let line: String = keys
            .chars()
            .map(|key| {
                if eliminated.contains(&key) {
                    return " · ".bright_black().to_string();
                }
                match keyboard.get(key) {
                    Some(verdict) => tile(key, verdict).to_string(),
                    None => format!(" {key} "),
                }
            })
            .collect();
        println!("  {}{line}", " ".repeat(indent * 2));
    }
    println!();
}

/// Print the whole board: submitted rows, the current row and the keyboard
pub fn print_board(snapshot: &SessionSnapshot) {
    println!();
    for (index, row) in snapshot.rows.iter().enumerate() {
        print_row(index, row);
    }
    if !snapshot.status.is_over() {
        print_preview(snapshot);
    }
    if keyboard_has_news(snapshot) {
        print_keyboard(&snapshot.keyboard, &snapshot.eliminated);
    } else {
        println!();
    }
}

/// The keyboard is only worth drawing once some letter has a state
fn keyboard_has_news(snapshot: &SessionSnapshot) -> bool {
    !snapshot.keyboard.is_empty() || !snapshot.eliminated.is_empty()
}

/// Print the reward summary after a finished game
pub fn print_completion(snapshot: &SessionSnapshot, completion: &Completion) {
    let answer = snapshot
        .answer
        .as_ref()
        .map_or_else(String::new, ToString::to_string);

    println!("\n{}", "═".repeat(60).bright_cyan());
    match snapshot.status {
        _ if snapshot.skipped => println!(
            "{}",
            format!("  ⏭  Level {} skipped: {answer}", snapshot.level)
                .yellow()
                .bold()
        ),
        GameStatus::Won => println!(
            "{}",
            format!(
                "  🎉 Level {} solved in {}!",
                snapshot.level,
                snapshot.current_row + 1
            )
            .bright_green()
            .bold()
        ),
        _ => println!(
            "{}",
            format!("  ❌ Out of guesses. The word was {answer}")
                .red()
                .bold()
        ),
    }
    println!("{}", "═".repeat(60).bright_cyan());

    if completion.coins_earned > 0 {
        println!(
            "  +{} coins",
            completion.coins_earned.to_string().bright_yellow().bold()
        );
    }
    println!(
        "  Coins: {}   Next level: {}\n",
        completion.coins.to_string().bright_yellow(),
        completion.next_level.to_string().bright_cyan()
    );
}

/// Print the progression summary
pub fn print_stats(state: &ProgressionState) {
    let played = state.games_played();
    let won = state.games_won();
    let rate = win_rate(won, played);

    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "PLAYER STATS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n💰 Coins:          {}", state.coins.to_string().bright_yellow().bold());
    println!("🎯 Current level:  {}", state.current_level);
    println!("🏔  Highest level:  {}", state.max_level);
    println!("⭐ Best score:     {}", state.max_score);
    println!("⏱  Best time:      {}", format_time(state.max_time_ms));

    println!("\n📊 {}", "Recent games:".bright_cyan().bold());
    println!("   Played:   {played}");
    println!(
        "   Won:      {won} [{}] {rate}%",
        create_progress_bar(won, played, 20).green()
    );

    println!("\n📈 {}", "Guess distribution:".bright_cyan().bold());
    for attempts in 1..=u32::try_from(MAX_ROWS).unwrap_or(u32::MAX) {
        let count = state
            .game_history
            .iter()
            .filter(|r| r.won && !r.skipped && r.attempts == attempts)
            .count();
        let bar = format!(
            "{}{}",
            "█".repeat(count.min(40)).green(),
            "░".repeat(40_usize.saturating_sub(count)).bright_black()
        );
        println!("   {attempts}: {bar} {count:3}");
    }
    println!();
}

fn result_label(record: &GameRecord) -> ColoredString {
    if record.skipped {
        "skipped".yellow()
    } else if record.won {
        "won".green()
    } else {
        "lost".red()
    }
}

/// Print the most recent games, newest first
pub fn print_history(records: &[GameRecord]) {
    if records.is_empty() {
        println!("\nNo games played yet.\n");
        return;
    }

    println!(
        "\n  {:>5}  {:<8}  {:>8}  {:>6}  {:>5}  {:>5}",
        "Level", "Result", "Attempts", "Time", "Score", "Coins"
    );
    println!("  {}", "─".repeat(48).bright_black());
    for record in records {
        println!(
            "  {:>5}  {:<8}  {:>8}  {:>6}  {:>5}  {:>5}",
            record.level,
            result_label(record),
            record.attempts,
            format_time(record.elapsed_ms),
            record.score,
            record.coins_earned
        );
    }
    println!();
}
