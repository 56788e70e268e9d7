// Layout orchestration

pub mod confirm;
pub mod input;
pub mod theme;
pub mod worktree_list;

use chrono::Utc;
use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::{App, Mode};
use crate::ui::{
    confirm::confirm_lines,
    theme::Theme,
    worktree_list::{compute_scroll, render_rows, viewport_rows},
};

const NORMAL_HELP: &str = "[n]ew  [d]elete  [enter] switch  [/] search  [r]efresh  [q]uit";
const INPUT_HELP: &str = "[enter] confirm  [esc] cancel";

pub fn render(frame: &mut Frame, app: &mut App, theme: &Theme) {
    let area = frame.area();

    if let Some(msg) = &app.fatal {
        frame.render_widget(Paragraph::new(fatal_lines(msg, theme)), area);
        return;
    }

    let mut lines = vec![Line::styled(
        format!("Git Worktrees - {}", app.repo_root.display()),
        theme.title,
    )];
    if let Some(prompt) = prompt_line(app, theme) {
        lines.push(prompt);
    }
    lines.push(Line::raw(""));

    if let Mode::ConfirmDelete { target } = &app.mode {
        lines.extend(confirm_lines(target, theme));
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    let viewport = viewport_rows(area.height);
    app.scroll = compute_scroll(app.cursor, viewport, app.scroll);
    lines.extend(render_rows(
        &app.filtered,
        app.cursor,
        app.scroll,
        viewport,
        theme,
        Utc::now(),
    ));

    if let Some(status) = &app.status {
        lines.push(Line::raw(""));
        lines.push(Line::styled(status.text.clone(), theme.success));
    }
    if let Some(err) = &app.error {
        lines.push(Line::raw(""));
        lines.push(Line::styled(format!("Error: {}", err.trim_end()), theme.error));
    }

    lines.push(Line::raw(""));
    lines.push(help_line(app, theme));

    frame.render_widget(Paragraph::new(lines), area);
}

fn fatal_lines(msg: &str, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::styled(format!("Error: {}", msg.trim_end()), theme.error),
        Line::raw(""),
        Line::styled("Press q to quit.", theme.error),
    ]
}

/// Live input with a block cursor, or the committed search term dimmed.
fn prompt_line(app: &App, theme: &Theme) -> Option<Line<'static>> {
    let (label, value, live) = match &app.mode {
        Mode::Search { query } => ("Search: ", query.value().to_string(), true),
        Mode::CreateBranch { input } => ("New branch name: ", input.value().to_string(), true),
        _ if !app.search_term.is_empty() => ("Search: ", app.search_term.clone(), false),
        _ => return None,
    };
    let value = if live {
        Span::raw(format!("{}█", value))
    } else {
        Span::styled(value, theme.dim)
    };
    Some(Line::from(vec![Span::styled(label, theme.prompt), value]))
}

fn help_line(app: &App, theme: &Theme) -> Line<'static> {
    let text = match app.mode {
        Mode::Normal if app.error.is_some() => format!("{}  [esc] dismiss", NORMAL_HELP),
        Mode::Normal => NORMAL_HELP.to_string(),
        _ => INPUT_HELP.to_string(),
    };
    Line::styled(text, theme.help)
}
