// wtm: git worktree manager TUI
// Lists, creates and deletes worktrees of the current repository and opens a shell in one.

mod action;
mod app;
mod config;
mod event;
mod git;
mod gitignore;
mod logging;
mod model;
mod ops;
mod shell;
mod tui;
mod ui;

use anyhow::{Context, Result};
use app::{App, Exit};
use config::Config;
use crossterm::style::Stylize;
use git::GitCli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logging is best-effort; the TUI still runs without a log file.
    let guard = logging::init().ok();
    let code = report(run());
    // flush buffered log lines before the process ends
    drop(guard);
    code
}

fn report(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "exiting with error");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    let config = Config::load();

    let mut terminal = tui::init().context("terminal init failed")?;
    let mut app = App::new(Box::new(GitCli), config, cwd);
    let result = app.run(&mut terminal);

    // Always restore terminal, even on error
    let _ = tui::restore(&mut terminal);

    match result? {
        Exit::Quit => Ok(()),
        Exit::Shell { dir, shell } => {
            println!("\n{}", format!("Switching to {}...", dir.display()).dim());
            shell::spawn_in(&dir, &shell)?;
            Ok(())
        }
    }
}
