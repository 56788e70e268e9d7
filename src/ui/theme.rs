// Styles for every element of the frame, built once and passed to render.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub title: Style,
    pub prompt: Style,
    pub dim: Style,
    pub selected: Style,
    pub current: Style,
    pub dirty: Style,
    pub branch: Style,
    pub help: Style,
    pub error: Style,
    pub success: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::new().fg(Color::Indexed(220)).add_modifier(Modifier::BOLD),
            prompt: Style::new().fg(Color::Indexed(86)).add_modifier(Modifier::BOLD),
            dim: Style::new().fg(Color::Indexed(240)),
            selected: Style::new().bg(Color::Indexed(236)).add_modifier(Modifier::BOLD),
            current: Style::new().fg(Color::Indexed(82)).add_modifier(Modifier::BOLD),
            dirty: Style::new().fg(Color::Indexed(214)),
            branch: Style::new().fg(Color::Indexed(141)).add_modifier(Modifier::BOLD),
            help: Style::new().fg(Color::Indexed(240)),
            error: Style::new().fg(Color::Indexed(196)).add_modifier(Modifier::BOLD),
            success: Style::new().fg(Color::Indexed(82)),
        }
    }
}
