// Worktree CRUD, all via git CLI
// ref: git-worktree(1), https://git-scm.com/docs/git-worktree

use std::path::Path;

use super::{info, GitError, GitExec, GitOutput};
use crate::model::worktree::Worktree;

/// How a new worktree gets its branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchSource {
    /// Branch exists as a local ref.
    Local,
    /// Branch exists only on origin.
    Remote,
    /// Branch is created with the worktree.
    New,
}

/// List worktrees via `git worktree list --porcelain`, then enrich each one
/// with dirty state and last commit. Only the listing itself can fail.
pub fn list_worktrees(
    exec: &dyn GitExec,
    repo_root: &Path,
    cwd: &Path,
) -> Result<Vec<Worktree>, GitError> {
    let args = ["worktree", "list", "--porcelain"];
    let out = exec.run(repo_root, &args)?.check(&args)?;
    let mut worktrees = parse_porcelain_output(&out.stdout);

    let cwd = cwd.to_string_lossy();
    for wt in &mut worktrees {
        // plain prefix test: /x/feature also matches a cwd under /x/feature-2
        wt.is_current = cwd.starts_with(wt.path.to_string_lossy().as_ref());
        if let Some(dirty) = info::is_dirty(exec, &wt.path) {
            wt.is_dirty = dirty;
        }
        if let Some(commit) = info::last_commit(exec, &wt.path) {
            wt.last_commit = commit;
        }
        tracing::debug!(
            path = %wt.path.display(),
            head = %wt.head,
            commit = %wt.last_commit.hash,
            author = %wt.last_commit.author,
            dirty = wt.is_dirty,
            "worktree"
        );
    }
    Ok(worktrees)
}

fn parse_porcelain_output(output: &str) -> Vec<Worktree> {
    let mut entries: Vec<Worktree> = Vec::new();
    let mut current: Option<Worktree> = None;

    for line in output.lines() {
        if let Some(p) = line.strip_prefix("worktree ") {
            finish(current.take(), &mut entries);
            current = Some(Worktree::new(p));
        } else if line.is_empty() {
            finish(current.take(), &mut entries);
        } else if let Some(wt) = current.as_mut() {
            if let Some(h) = line.strip_prefix("HEAD ") {
                wt.head = h.to_string();
            } else if let Some(b) = line.strip_prefix("branch ") {
                wt.branch = b.strip_prefix("refs/heads/").unwrap_or(b).to_string();
            }
        }
    }

    // Last entry (no trailing blank line)
    finish(current, &mut entries);
    entries
}

fn finish(wt: Option<Worktree>, entries: &mut Vec<Worktree>) {
    if let Some(wt) = wt {
        if !wt.path.as_os_str().is_empty() && !entries.iter().any(|e| e.path == wt.path) {
            entries.push(wt);
        }
    }
}

/// `git rev-parse --verify {branch}` succeeds.
pub fn local_branch_exists(exec: &dyn GitExec, repo_root: &Path, branch: &str) -> bool {
    exec.run(repo_root, &["rev-parse", "--verify", branch])
        .map(|o| o.success)
        .unwrap_or(false)
}

/// `git ls-remote --heads origin {branch}` lists something.
pub fn remote_branch_exists(exec: &dyn GitExec, repo_root: &Path, branch: &str) -> bool {
    exec.run(repo_root, &["ls-remote", "--heads", "origin", branch])
        .map(|o| o.success && !o.stdout.trim().is_empty())
        .unwrap_or(false)
}

pub fn resolve_branch(exec: &dyn GitExec, repo_root: &Path, branch: &str) -> BranchSource {
    if local_branch_exists(exec, repo_root, branch) {
        BranchSource::Local
    } else if remote_branch_exists(exec, repo_root, branch) {
        BranchSource::Remote
    } else {
        BranchSource::New
    }
}

/// `git worktree add -b {branch} {path}` for new branches,
/// `git worktree add {path} {branch}` otherwise.
pub fn add_worktree(
    exec: &dyn GitExec,
    repo_root: &Path,
    path: &Path,
    branch: &str,
    source: BranchSource,
) -> Result<GitOutput, GitError> {
    let path = path.to_string_lossy();
    let path: &str = &path;
    let args: Vec<&str> = match source {
        BranchSource::New => vec!["worktree", "add", "-b", branch, path],
        BranchSource::Local | BranchSource::Remote => vec!["worktree", "add", path, branch],
    };
    exec.run(repo_root, &args)?.check(&args)
}

/// `git worktree remove {path} --force`
pub fn remove_worktree(exec: &dyn GitExec, repo_root: &Path, path: &Path) -> Result<GitOutput, GitError> {
    let path = path.to_string_lossy();
    let path: &str = &path;
    let args = ["worktree", "remove", path, "--force"];
    exec.run(repo_root, &args)?.check(&args)
}
