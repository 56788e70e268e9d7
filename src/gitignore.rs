// Keeps the worktree storage dir out of version control via the repo's .gitignore.

use std::path::Path;

use anyhow::{Context, Result};

const HEADER: &str = "# Git worktrees";

/// Append `entry/` to `<repo_root>/.gitignore` unless it (or the entry
/// without its trailing slash) is already listed.
pub fn ensure_entry(repo_root: &Path, entry: &str) -> Result<()> {
    let path = repo_root.join(".gitignore");
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };

    let Some(updated) = with_entry(&content, entry) else {
        return Ok(());
    };
    std::fs::write(&path, updated).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(entry, "added worktree dir to .gitignore");
    Ok(())
}

/// New file content, or None when the entry is already present.
fn with_entry(content: &str, entry: &str) -> Option<String> {
    let entry = if entry.ends_with('/') {
        entry.to_string()
    } else {
        format!("{}/", entry)
    };
    let bare = entry.trim_end_matches('/');

    if content
        .lines()
        .map(str::trim)
        .any(|l| l == entry || l == bare)
    {
        return None;
    }

    let mut out = if content.is_empty() {
        format!("{}\n", HEADER)
    } else {
        let mut s = content.to_string();
        if !s.ends_with('\n') {
            s.push('\n');
        }
        if !content.lines().any(|l| l.contains(HEADER)) {
            s.push('\n');
            s.push_str(HEADER);
            s.push('\n');
        }
        s
    };
    out.push_str(&entry);
    out.push('\n');
    Some(out)
}
