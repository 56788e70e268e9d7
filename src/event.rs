use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::action::Action;

/// Which key map applies to the next key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Normal,
    Input,
    Confirm,
}

/// Wait up to `timeout` for one terminal event. `None` means the timeout
/// elapsed, which the caller treats as a timer tick.
pub fn poll_event(timeout: Duration, context: KeyContext) -> Result<Option<Action>> {
    if event::poll(timeout)? {
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => translate(key, context),
            Event::Resize(w, h) => Action::Resize(w, h),
            _ => Action::None,
        };
        Ok(Some(action))
    } else {
        Ok(None)
    }
}

pub fn translate(key: KeyEvent, context: KeyContext) -> Action {
    match context {
        KeyContext::Normal => translate_key(key),
        KeyContext::Input => translate_input_key(key),
        KeyContext::Confirm => translate_confirm_key(key),
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Input mode: only special keys are translated; all chars go to the buffer.
fn translate_input_key(key: KeyEvent) -> Action {
    if is_ctrl_c(&key) {
        return Action::InputEscape;
    }
    match key.code {
        KeyCode::Enter => Action::Select,
        KeyCode::Esc => Action::InputEscape,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Action::InputChar(c)
        }
        _ => Action::None,
    }
}

fn translate_confirm_key(key: KeyEvent) -> Action {
    if is_ctrl_c(&key) {
        return Action::ConfirmNo;
    }
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Action::ConfirmYes,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::ConfirmNo,
        _ => Action::None,
    }
}

/// Normal mode: chars are commands.
fn translate_key(key: KeyEvent) -> Action {
    if is_ctrl_c(&key) {
        return Action::Quit;
    }
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => Action::Quit,
        (KeyModifiers::NONE, KeyCode::Char('j')) | (KeyModifiers::NONE, KeyCode::Down) => Action::NavigateDown,
        (KeyModifiers::NONE, KeyCode::Char('k')) | (KeyModifiers::NONE, KeyCode::Up) => Action::NavigateUp,
        (KeyModifiers::NONE, KeyCode::Enter) => Action::Select,
        (KeyModifiers::NONE, KeyCode::Char('/')) => Action::Search,
        (KeyModifiers::NONE, KeyCode::Char('n')) => Action::NewBranch,
        (KeyModifiers::NONE, KeyCode::Char('d')) => Action::Delete,
        (KeyModifiers::NONE, KeyCode::Char('r')) => Action::Refresh,
        (KeyModifiers::NONE, KeyCode::Esc) => Action::InputEscape,
        _ => Action::None,
    }
}
