// Per-worktree status queries: dirty flag and last commit.
// Failures return None; the caller keeps default metadata.

use std::path::Path;

use chrono::DateTime;

use super::GitExec;
use crate::model::worktree::CommitInfo;

const LOG_FORMAT: &str = "--pretty=format:%H|%s|%ai|%an";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// `git status --porcelain` produced any output.
pub fn is_dirty(exec: &dyn GitExec, worktree: &Path) -> Option<bool> {
    let out = exec.run(worktree, &["status", "--porcelain"]).ok()?;
    if !out.success {
        return None;
    }
    Some(!out.stdout.trim().is_empty())
}

pub fn last_commit(exec: &dyn GitExec, worktree: &Path) -> Option<CommitInfo> {
    let out = exec.run(worktree, &["log", "-1", LOG_FORMAT]).ok()?;
    if !out.success {
        return None;
    }
    parse_log_line(&out.stdout)
}

/// Parse `hash|subject|author-date|author`.
fn parse_log_line(line: &str) -> Option<CommitInfo> {
    let line = line.trim_end_matches('\n');
    if line.is_empty() {
        return None;
    }
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 4 {
        return None;
    }
    // a subject containing '|' splits into extra fields; date and author are always last
    let n = parts.len();
    let hash: String = parts[0].chars().take(7).collect();
    let subject = parts[1..n - 2].join("|");
    let date = DateTime::parse_from_str(parts[n - 2], DATE_FORMAT).ok();
    Some(CommitInfo {
        hash,
        subject,
        date,
        author: parts[n - 1].to_string(),
    })
}
