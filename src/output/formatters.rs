//! Formatting utilities for terminal output

/// Format a duration in milliseconds as `m:ss`, or `N/A` when unset (0)
#[must_use]
pub fn format_time(ms: u64) -> String {
    if ms == 0 {
        return "N/A".to_string();
    }
    let seconds = ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Win rate as a whole percentage, 0 when nothing has been played
#[must_use]
pub fn win_rate(won: usize, played: usize) -> u32 {
    if played == 0 {
        return 0;
    }
    u32::try_from(won.saturating_mul(100) / played).unwrap_or(100)
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (value.saturating_mul(width) / max).min(width)
    };

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Row counter shown next to a guess, e.g. `3/6`
#[must_use]
pub fn row_label(row: usize, total: usize) -> String {
    format!("{}/{total}", row + 1)
}

/// Short tally of a scored row, e.g. `2 correct, 1 present`
#[must_use]
pub fn feedback_summary(correct: usize, present: usize) -> String {
    match (correct, present) {
        (0, 0) => "no hits".to_string(),
        (correct, 0) => format!("{correct} correct"),
        (0, present) => format!("{present} present"),
        (correct, present) => format!("{correct} correct, {present} present"),
    }
}
