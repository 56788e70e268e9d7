// Delete confirmation prompt.

use ratatui::text::Line;

use crate::model::worktree::Worktree;
use crate::ui::theme::Theme;

/// Replaces the list while a delete is pending.
pub fn confirm_lines(target: &Worktree, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::raw(""),
        Line::styled(format!("Delete worktree '{}'? [y/N] ", target.label()), theme.error),
    ]
}
