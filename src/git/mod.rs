pub mod info;
pub mod worktree;

#[cfg(test)]
pub mod testing;

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("not in a git repository")]
    NotARepository,

    #[error("failed to run git {args}: {source}")]
    Spawn {
        args: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {args} failed: {output}")]
    Failed { args: String, output: String },
}

/// Captured result of one git invocation.
#[derive(Debug, Clone, Default)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// stdout followed by stderr, the way a terminal would show them.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        text.push_str(&self.stderr);
        text
    }

    /// Turn a non-zero exit into `GitError::Failed`.
    pub fn check(self, args: &[&str]) -> Result<GitOutput, GitError> {
        if self.success {
            Ok(self)
        } else {
            Err(GitError::Failed {
                args: args.join(" "),
                output: self.combined(),
            })
        }
    }
}

/// Synchronous git command executor. Every query and mutation goes through this.
pub trait GitExec {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput, GitError>;
}

/// Runs the real `git` binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitExec for GitCli {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput, GitError> {
        tracing::debug!(cwd = %dir.display(), args = %args.join(" "), "git");
        let out = git_cmd(dir)
            .args(args)
            .output()
            .map_err(|source| GitError::Spawn {
                args: args.join(" "),
                source,
            })?;
        Ok(GitOutput {
            success: out.status.success(),
            stdout: String::from_utf8_lossy(&out.stdout).to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        })
    }
}

/// Base git command scoped to `repo` via `-C`.
pub fn git_cmd(repo: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(repo);
    cmd
}

/// Top level of the repository containing `cwd`.
pub fn repo_root(exec: &dyn GitExec, cwd: &Path) -> Result<PathBuf, GitError> {
    let out = exec
        .run(cwd, &["rev-parse", "--show-toplevel"])
        .map_err(|_| GitError::NotARepository)?;
    let root = out.stdout.trim();
    if !out.success || root.is_empty() {
        return Err(GitError::NotARepository);
    }
    Ok(PathBuf::from(root))
}
