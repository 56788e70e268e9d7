// Scripted git executor for unit tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{GitError, GitExec, GitOutput};

struct Rule {
    dir: Option<PathBuf>,
    prefix: Vec<String>,
    output: GitOutput,
}

/// Answers by argument prefix. The most recently added matching rule wins,
/// so a test can override an earlier answer mid-scenario.
#[derive(Default)]
pub struct FakeGit {
    rules: RefCell<Vec<Rule>>,
    calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(self, prefix: &[&str], stdout: &str) -> Self {
        self.push(None, prefix, true, stdout, "");
        self
    }

    pub fn fail(self, prefix: &[&str], stderr: &str) -> Self {
        self.push(None, prefix, false, "", stderr);
        self
    }

    pub fn ok_in(self, dir: &str, prefix: &[&str], stdout: &str) -> Self {
        self.push(Some(PathBuf::from(dir)), prefix, true, stdout, "");
        self
    }

    pub fn fail_in(self, dir: &str, prefix: &[&str], stderr: &str) -> Self {
        self.push(Some(PathBuf::from(dir)), prefix, false, "", stderr);
        self
    }

    /// Add a rule through a shared handle.
    pub fn set(&self, prefix: &[&str], success: bool, stdout: &str) {
        self.push(None, prefix, success, stdout, if success { "" } else { stdout });
    }

    fn push(&self, dir: Option<PathBuf>, prefix: &[&str], success: bool, stdout: &str, stderr: &str) {
        self.rules.borrow_mut().push(Rule {
            dir,
            prefix: prefix.iter().map(|s| s.to_string()).collect(),
            output: GitOutput {
                success,
                stdout: if success { stdout.to_string() } else { String::new() },
                stderr: stderr.to_string(),
            },
        });
    }

    /// Calls whose arguments start with `prefix`.
    pub fn calls_matching(&self, prefix: &[&str]) -> Vec<Vec<String>> {
        self.calls
            .borrow()
            .iter()
            .filter(|(_, args)| starts_with(args, prefix))
            .map(|(_, args)| args.clone())
            .collect()
    }
}

fn starts_with(args: &[String], prefix: &[&str]) -> bool {
    args.len() >= prefix.len() && args.iter().zip(prefix).all(|(a, p)| a == p)
}

impl GitExec for FakeGit {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput, GitError> {
        let owned: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        self.calls.borrow_mut().push((dir.to_path_buf(), owned.clone()));
        let rules = self.rules.borrow();
        let hit = rules.iter().rev().find(|r| {
            r.dir.as_deref().map_or(true, |d| d == dir)
                && r.prefix.len() <= owned.len()
                && r.prefix.iter().zip(&owned).all(|(p, a)| p == a)
        });
        Ok(hit.map(|r| r.output.clone()).unwrap_or_else(|| GitOutput {
            success: false,
            stdout: String::new(),
            stderr: format!("fake git: no rule for {}", args.join(" ")),
        }))
    }
}

impl<T: GitExec + ?Sized> GitExec for Rc<T> {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<GitOutput, GitError> {
        (**self).run(dir, args)
    }
}

pub const SAMPLE_ROOT: &str = "/src/repo";
pub const SAMPLE_FEATURE: &str = "/src/repo/.worktrees/feature-x";

/// Repository with a clean `main` at the root and a dirty `feature/x`
/// whose last commit "fix bug" is two hours old.
pub fn sample_repo() -> FakeGit {
    let two_hours_ago = (chrono::Local::now() - chrono::Duration::hours(2))
        .format("%Y-%m-%d %H:%M:%S %z")
        .to_string();
    let listing = format!(
        "worktree {SAMPLE_ROOT}\nHEAD 1111111\nbranch refs/heads/main\n\n\
         worktree {SAMPLE_FEATURE}\nHEAD 2222222\nbranch refs/heads/feature/x\n\n"
    );
    FakeGit::new()
        .ok(&["rev-parse", "--show-toplevel"], &format!("{SAMPLE_ROOT}\n"))
        .ok(&["worktree", "list"], &listing)
        .ok(&["status"], "")
        .ok_in(SAMPLE_FEATURE, &["status"], " M src/lib.rs\n")
        .ok(&["log"], "aaaaaaaaaa|Initial commit|2024-01-01 10:00:00 +0000|Ada")
        .ok_in(SAMPLE_FEATURE, &["log"], &format!("bbbbbbbbbb|fix bug|{two_hours_ago}|Bob"))
}
