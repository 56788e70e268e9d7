// Worktree list rows: cursor marker, branch, dirty glyph and last commit.

use chrono::{DateTime, FixedOffset, Utc};
use ratatui::text::{Line, Span};

use crate::model::worktree::Worktree;
use crate::ui::theme::Theme;

const SUBJECT_WIDTH: usize = 40;
const BRANCH_WIDTH: usize = 20;
/// Title, prompt, status and help take this many rows.
const CHROME_ROWS: u16 = 8;
const MIN_VIEWPORT: usize = 5;

/// Rows available for the list in a terminal `height` rows tall.
pub fn viewport_rows(height: u16) -> usize {
    (height.saturating_sub(CHROME_ROWS) as usize).max(MIN_VIEWPORT)
}

/// Compute scroll offset to keep selected item visible.
pub fn compute_scroll(selected: usize, visible_height: usize, current_offset: usize) -> usize {
    if selected < current_offset {
        selected
    } else if selected >= current_offset + visible_height {
        selected.saturating_sub(visible_height.saturating_sub(1))
    } else {
        current_offset
    }
}

/// Visible slice of `worktrees` starting at `scroll`.
pub fn render_rows(
    worktrees: &[Worktree],
    cursor: usize,
    scroll: usize,
    viewport: usize,
    theme: &Theme,
    now: DateTime<Utc>,
) -> Vec<Line<'static>> {
    if worktrees.is_empty() {
        return vec![Line::styled("  No worktrees found", theme.dim)];
    }
    worktrees
        .iter()
        .enumerate()
        .skip(scroll)
        .take(viewport)
        .map(|(i, wt)| render_row(wt, i == cursor, theme, now))
        .collect()
}

fn render_row(wt: &Worktree, selected: bool, theme: &Theme, now: DateTime<Utc>) -> Line<'static> {
    let marker = if selected { "▸ " } else { "  " };
    let (label, label_style) = if wt.is_current {
        (format!("● {}", wt.label()), theme.current)
    } else {
        (wt.label().to_string(), theme.branch)
    };
    let glyph = if wt.is_dirty {
        Span::styled("●", theme.dirty)
    } else {
        Span::raw("✓")
    };

    let subject = truncate_subject(&wt.last_commit.subject);
    let when = relative_time(wt.last_commit.date, now);
    let detail = if when.is_empty() {
        subject
    } else {
        format!("{} ({})", subject, when)
    };

    let line = Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{:<width$}", label, width = BRANCH_WIDTH), label_style),
        Span::raw(" "),
        glyph,
        Span::raw("  "),
        Span::styled(detail, theme.dim),
    ]);
    if selected {
        line.style(theme.selected)
    } else {
        line
    }
}

pub fn truncate_subject(subject: &str) -> String {
    if subject.chars().count() > SUBJECT_WIDTH {
        let head: String = subject.chars().take(SUBJECT_WIDTH).collect();
        format!("{}...", head)
    } else {
        subject.to_string()
    }
}

/// "just now", "N minutes ago", ... or an absolute date past a week.
pub fn relative_time(date: Option<DateTime<FixedOffset>>, now: DateTime<Utc>) -> String {
    let Some(date) = date else {
        return String::new();
    };
    let diff = now.signed_duration_since(date.with_timezone(&Utc));
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };
    if diff.num_seconds() < 60 {
        "just now".to_string()
    } else if diff.num_minutes() < 60 {
        plural(diff.num_minutes(), "minute")
    } else if diff.num_hours() < 24 {
        plural(diff.num_hours(), "hour")
    } else if diff.num_days() < 7 {
        plural(diff.num_days(), "day")
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}
