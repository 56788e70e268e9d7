// Worktree operation functions: business logic only, no App state.

use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::{
    config::Config,
    git::{worktree as git_worktree, GitError, GitExec},
    gitignore,
};

/// Create a worktree for `branch` under the configured storage dir.
/// Returns the new worktree's path.
pub fn create_worktree(
    exec: &dyn GitExec,
    repo_root: &Path,
    branch: &str,
    config: &Config,
) -> Result<PathBuf> {
    let storage = config.storage_dir(repo_root);
    std::fs::create_dir_all(&storage)
        .with_context(|| format!("creating {}", storage.display()))?;

    if let Some(rel) = inside_repo(repo_root, &storage) {
        if let Err(e) = gitignore::ensure_entry(repo_root, &rel) {
            tracing::warn!(error = %format!("{:#}", e), "could not update .gitignore");
        }
    }

    let wt_path = storage.join(branch.replace('/', "-"));
    let source = git_worktree::resolve_branch(exec, repo_root, branch);
    tracing::info!(branch, path = %wt_path.display(), ?source, "creating worktree");

    git_worktree::add_worktree(exec, repo_root, &wt_path, branch, source)
        .map_err(|e| wrap("failed to create worktree", e))?;
    Ok(wt_path)
}

/// Force-remove the worktree at `path`. Callers must not pass the main worktree.
pub fn delete_worktree(exec: &dyn GitExec, repo_root: &Path, path: &Path) -> Result<()> {
    tracing::info!(path = %path.display(), "removing worktree");
    git_worktree::remove_worktree(exec, repo_root, path)
        .map_err(|e| wrap("failed to remove worktree", e))?;
    Ok(())
}

fn wrap(what: &str, err: GitError) -> anyhow::Error {
    match err {
        GitError::Failed { output, .. } => anyhow!("{}: {}", what, output),
        other => anyhow::Error::new(other).context(what.to_string()),
    }
}

/// `storage` relative to `repo_root` when it lies inside the repo.
fn inside_repo(repo_root: &Path, storage: &Path) -> Option<String> {
    let rel = storage.strip_prefix(repo_root).ok()?;
    if rel.as_os_str().is_empty() || matches!(rel.components().next(), Some(Component::ParentDir)) {
        return None;
    }
    Some(rel.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::FakeGit;
    use tempfile::TempDir;

    fn new_branch_git() -> FakeGit {
        FakeGit::new()
            .fail(&["rev-parse", "--verify"], "fatal: Needed a single revision")
            .ok(&["ls-remote"], "")
            .ok(&["worktree", "add"], "Preparing worktree (new branch 'my-feature')\n")
    }

    #[test]
    fn creates_new_branch_under_default_storage() {
        let repo = TempDir::new().unwrap();
        let git = new_branch_git();

        let path = create_worktree(&git, repo.path(), "my-feature", &Config::default()).unwrap();

        let storage = repo.path().join(".worktrees");
        assert_eq!(path, storage.join("my-feature"));
        assert!(storage.is_dir());
        let add = git.calls_matching(&["worktree", "add"]);
        assert_eq!(add.len(), 1);
        assert_eq!(add[0][2], "-b");
        assert_eq!(add[0][3], "my-feature");
        let ignore = std::fs::read_to_string(repo.path().join(".gitignore")).unwrap();
        assert_eq!(ignore, "# Git worktrees\n.worktrees/\n");
    }

    #[test]
    fn slashes_in_branch_become_dashes() {
        let repo = TempDir::new().unwrap();
        let git = FakeGit::new()
            .ok(&["rev-parse", "--verify"], "abc\n")
            .ok(&["worktree", "add"], "");
        let path = create_worktree(&git, repo.path(), "feature/x", &Config::default()).unwrap();
        assert!(path.ends_with("feature-x"));
        let add = &git.calls_matching(&["worktree", "add"])[0];
        assert_eq!(add[3], "feature/x");
        assert!(git.calls_matching(&["ls-remote"]).is_empty());
    }

    #[test]
    fn storage_outside_repo_leaves_gitignore_alone() {
        let repo = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let config = Config {
            worktree_dir: Some(elsewhere.path().to_string_lossy().to_string()),
            ..Config::default()
        };
        create_worktree(&new_branch_git(), repo.path(), "x", &config).unwrap();
        assert!(!repo.path().join(".gitignore").exists());
    }

    #[test]
    fn gitignore_failure_does_not_abort() {
        let repo = TempDir::new().unwrap();
        // a directory where the file should be makes the read fail
        std::fs::create_dir(repo.path().join(".gitignore")).unwrap();
        let path = create_worktree(&new_branch_git(), repo.path(), "x", &Config::default());
        assert!(path.is_ok());
    }

    #[test]
    fn add_failure_surfaces_git_output() {
        let repo = TempDir::new().unwrap();
        let git = new_branch_git().fail(&["worktree", "add"], "fatal: 'x' is already checked out");
        let err = create_worktree(&git, repo.path(), "x", &Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "failed to create worktree: fatal: 'x' is already checked out");
    }

    #[test]
    fn delete_forces_removal() {
        let git = FakeGit::new().ok(&["worktree", "remove"], "");
        delete_worktree(&git, Path::new("/r"), Path::new("/r/.worktrees/x")).unwrap();
        assert_eq!(
            git.calls_matching(&["worktree", "remove"])[0],
            vec!["worktree", "remove", "/r/.worktrees/x", "--force"]
        );
    }

    #[test]
    fn delete_failure_surfaces_git_output() {
        let git = FakeGit::new().fail(&["worktree", "remove"], "fatal: not a working tree");
        let err = delete_worktree(&git, Path::new("/r"), Path::new("/r/x")).unwrap_err();
        assert_eq!(err.to_string(), "failed to remove worktree: fatal: not a working tree");
    }

    #[test]
    fn inside_repo_rejects_parent_escape() {
        let root = Path::new("/src/repo");
        assert_eq!(inside_repo(root, Path::new("/src/repo/.worktrees")).as_deref(), Some(".worktrees"));
        assert_eq!(inside_repo(root, Path::new("/src/repo/../trees")), None);
        assert_eq!(inside_repo(root, Path::new("/src/repo")), None);
        assert_eq!(inside_repo(root, Path::new("/other")), None);
    }
}
