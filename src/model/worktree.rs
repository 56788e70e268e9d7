use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};

/// One checked-out working copy, as reported by the latest listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Worktree {
    pub path: PathBuf,
    /// Short branch name; empty when HEAD is detached.
    pub branch: String,
    pub head: String,
    pub is_dirty: bool,
    pub last_commit: CommitInfo,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitInfo {
    pub hash: String,
    pub subject: String,
    /// None when git gave no date or it did not parse.
    pub date: Option<DateTime<FixedOffset>>,
    pub author: String,
}

impl Worktree {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn is_detached(&self) -> bool {
        self.branch.is_empty()
    }

    /// Branch name, or `(detached)`.
    pub fn label(&self) -> &str {
        if self.is_detached() {
            "(detached)"
        } else {
            &self.branch
        }
    }

    /// The main worktree is the one whose path the repository root ends with.
    pub fn is_main_of(&self, repo_root: &Path) -> bool {
        repo_root
            .to_string_lossy()
            .ends_with(self.path.to_string_lossy().as_ref())
    }
}
