// App state machine and event loop.
// ref: ratatui app patterns, https://ratatui.rs/concepts/application-patterns/

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::{
    action::Action,
    config::Config,
    event::{poll_event, KeyContext},
    git::{self, worktree as git_worktree, GitExec},
    model::{filter::filter, worktree::Worktree},
    ops,
    tui::Tui,
    ui::{self, input::InputState, theme::Theme},
};

const TICK: Duration = Duration::from_secs(1);
const REFRESH_STATUS_TTL: Duration = Duration::from_secs(2);
const MUTATION_STATUS_TTL: Duration = Duration::from_secs(3);

// ── Modes ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Live filter; the query becomes the committed search term on Enter.
    Search { query: InputState },
    CreateBranch { input: InputState },
    /// Overlay asking to remove `target`. Intercepts every key.
    ConfirmDelete { target: Worktree },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub expires_at: Instant,
}

/// What the driver should do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
    SwitchTo(PathBuf),
}

/// How the session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    Quit,
    /// Hand the terminal to `shell` rooted at `dir`.
    Shell { dir: PathBuf, shell: String },
}

// ── App ──────────────────────────────────────────────────────────────────────

pub struct App {
    git: Box<dyn GitExec>,
    pub config: Config,
    pub repo_root: PathBuf,
    cwd: PathBuf,
    pub worktrees: Vec<Worktree>,
    pub filtered: Vec<Worktree>,
    pub cursor: usize,
    pub scroll: usize,
    /// Filter committed from the last search.
    pub search_term: String,
    pub mode: Mode,
    pub status: Option<StatusMessage>,
    /// Recoverable error shown next to the list.
    pub error: Option<String>,
    /// Startup failure; replaces the whole view and only quit is accepted.
    pub fatal: Option<String>,
}

impl App {
    /// Resolve the repository from `cwd` and load the initial listing.
    /// Failures put the app into the fatal error view instead of returning.
    pub fn new(git: Box<dyn GitExec>, config: Config, cwd: PathBuf) -> Self {
        let mut app = Self {
            git,
            config,
            repo_root: PathBuf::new(),
            cwd,
            worktrees: Vec::new(),
            filtered: Vec::new(),
            cursor: 0,
            scroll: 0,
            search_term: String::new(),
            mode: Mode::Normal,
            status: None,
            error: None,
            fatal: None,
        };

        let repo_root = match git::repo_root(app.git.as_ref(), &app.cwd) {
            Ok(root) => root,
            Err(e) => {
                tracing::error!(error = %e, cwd = %app.cwd.display(), "startup failed");
                app.fatal = Some(e.to_string());
                return app;
            }
        };
        app.repo_root = repo_root;
        tracing::info!(repo = %app.repo_root.display(), "session started");

        match git_worktree::list_worktrees(app.git.as_ref(), &app.repo_root, &app.cwd) {
            Ok(worktrees) => {
                app.filtered = worktrees.clone();
                app.worktrees = worktrees;
            }
            Err(e) => {
                tracing::error!(error = %e, "initial worktree listing failed");
                app.fatal = Some(e.to_string());
            }
        }
        app
    }

    pub fn run(&mut self, terminal: &mut Tui) -> Result<Exit> {
        let theme = Theme::default();
        let mut last_tick = Instant::now();
        loop {
            terminal.draw(|frame| ui::render(frame, self, &theme))?;

            let timeout = TICK.saturating_sub(last_tick.elapsed());
            if let Some(action) = poll_event(timeout, self.key_context())? {
                match self.dispatch(action) {
                    Flow::Continue => {}
                    Flow::Quit => return Ok(Exit::Quit),
                    Flow::SwitchTo(dir) => {
                        let shell = self.config.shell(std::env::var("SHELL").ok());
                        tracing::info!(dir = %dir.display(), shell = %shell, "handing off to shell");
                        return Ok(Exit::Shell { dir, shell });
                    }
                }
            }
            if last_tick.elapsed() >= TICK {
                self.tick(Instant::now());
                last_tick = Instant::now();
            }
        }
    }

    pub fn key_context(&self) -> KeyContext {
        if self.fatal.is_some() {
            return KeyContext::Normal;
        }
        match self.mode {
            Mode::Normal => KeyContext::Normal,
            Mode::Search { .. } | Mode::CreateBranch { .. } => KeyContext::Input,
            Mode::ConfirmDelete { .. } => KeyContext::Confirm,
        }
    }

    /// Timer tick: drop the status message once it has expired.
    pub fn tick(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|s| now >= s.expires_at) {
            self.status = None;
        }
    }

    pub fn selected(&self) -> Option<&Worktree> {
        self.filtered.get(self.cursor)
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    pub fn dispatch(&mut self, action: Action) -> Flow {
        if let Action::Resize(width, height) = action {
            tracing::debug!(width, height, "terminal resized");
            return Flow::Continue;
        }
        if self.fatal.is_some() {
            return if action == Action::Quit { Flow::Quit } else { Flow::Continue };
        }
        match &self.mode {
            Mode::Normal => self.dispatch_normal(action),
            Mode::Search { .. } => {
                self.dispatch_search(action);
                Flow::Continue
            }
            Mode::CreateBranch { .. } => {
                self.dispatch_create(action);
                Flow::Continue
            }
            Mode::ConfirmDelete { .. } => {
                self.dispatch_confirm(action);
                Flow::Continue
            }
        }
    }

    fn dispatch_normal(&mut self, action: Action) -> Flow {
        match action {
            Action::Quit => return Flow::Quit,
            Action::NavigateUp => self.nav_up(),
            Action::NavigateDown => self.nav_down(),
            Action::Search => {
                self.search_term.clear();
                self.mode = Mode::Search { query: InputState::new() };
                self.refilter();
            }
            Action::NewBranch => {
                self.mode = Mode::CreateBranch { input: InputState::new() };
            }
            Action::Delete => self.action_delete(),
            Action::Refresh => {
                if self.refresh() {
                    self.set_status("Refreshed", REFRESH_STATUS_TTL);
                }
            }
            Action::Select => {
                if let Some(wt) = self.selected() {
                    return Flow::SwitchTo(wt.path.clone());
                }
            }
            Action::InputEscape => self.error = None,
            _ => {}
        }
        Flow::Continue
    }

    fn dispatch_search(&mut self, action: Action) {
        let Mode::Search { query } = &mut self.mode else {
            return;
        };
        match action {
            Action::InputChar(c) => query.insert_char(c),
            Action::InputBackspace => query.backspace(),
            Action::Select => {
                self.search_term = query.value().to_string();
                self.mode = Mode::Normal;
            }
            Action::InputEscape => {
                self.search_term.clear();
                self.mode = Mode::Normal;
            }
            _ => return,
        }
        self.refilter();
    }

    fn dispatch_create(&mut self, action: Action) {
        let Mode::CreateBranch { input } = &mut self.mode else {
            return;
        };
        match action {
            Action::InputChar(c) if ui::input::is_branch_char(c) => input.insert_char(c),
            Action::InputBackspace => input.backspace(),
            Action::Select => {
                let branch = (!input.is_empty()).then(|| input.value().to_string());
                self.mode = Mode::Normal;
                if let Some(branch) = branch {
                    self.do_create_worktree(&branch);
                }
            }
            Action::InputEscape => self.mode = Mode::Normal,
            _ => {}
        }
    }

    fn dispatch_confirm(&mut self, action: Action) {
        match action {
            Action::ConfirmYes => {
                let mode = std::mem::replace(&mut self.mode, Mode::Normal);
                if let Mode::ConfirmDelete { target } = mode {
                    self.do_delete_worktree(target);
                }
            }
            Action::ConfirmNo => self.mode = Mode::Normal,
            _ => {}
        }
    }

    // ── Navigation ────────────────────────────────────────────────────────────

    fn nav_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn nav_down(&mut self) {
        let max = self.filtered.len().saturating_sub(1);
        if self.cursor < max {
            self.cursor += 1;
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.filtered.len().saturating_sub(1));
    }

    /// Term the filtered list is derived from right now.
    pub fn active_term(&self) -> &str {
        match &self.mode {
            Mode::Search { query } => query.value(),
            _ => &self.search_term,
        }
    }

    fn refilter(&mut self) {
        let filtered = filter(&self.worktrees, self.active_term()).into_owned();
        self.filtered = filtered;
        self.clamp_cursor();
    }

    // ── Actions ───────────────────────────────────────────────────────────────

    fn action_delete(&mut self) {
        let Some(wt) = self.selected() else {
            return;
        };
        if wt.is_main_of(&self.repo_root) {
            self.error = Some("cannot delete main worktree".into());
            return;
        }
        let target = wt.clone();
        self.mode = Mode::ConfirmDelete { target };
    }

    /// Re-read worktrees from git. Returns false (and records the error) on failure.
    fn refresh(&mut self) -> bool {
        match git_worktree::list_worktrees(self.git.as_ref(), &self.repo_root, &self.cwd) {
            Ok(worktrees) => {
                self.worktrees = worktrees;
                self.refilter();
                self.error = None;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    fn do_create_worktree(&mut self, branch: &str) {
        match ops::create_worktree(self.git.as_ref(), &self.repo_root, branch, &self.config) {
            Ok(_) => {
                self.error = None;
                self.set_status(format!("Created worktree: {}", branch), MUTATION_STATUS_TTL);
                self.refresh();
            }
            Err(e) => self.record_error(e),
        }
    }

    fn do_delete_worktree(&mut self, target: Worktree) {
        match ops::delete_worktree(self.git.as_ref(), &self.repo_root, &target.path) {
            Ok(()) => {
                self.error = None;
                self.worktrees.retain(|w| w.path != target.path);
                self.refilter();
                self.set_status(format!("Deleted worktree: {}", target.label()), MUTATION_STATUS_TTL);
                self.refresh();
            }
            Err(e) => self.record_error(e),
        }
    }

    fn record_error(&mut self, e: anyhow::Error) {
        tracing::warn!(error = %format!("{:#}", e), "operation failed");
        self.error = Some(format!("{:#}", e));
    }

    fn set_status(&mut self, text: impl Into<String>, ttl: Duration) {
        self.status = Some(StatusMessage {
            text: text.into(),
            expires_at: Instant::now() + ttl,
        });
    }
}
