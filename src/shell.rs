// Interactive shell handoff.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};

/// Run `shell` rooted at `dir` with the terminal's stdio and wait for it.
/// Only a spawn failure is an error; the shell's own exit status is returned as-is.
pub fn spawn_in(dir: &Path, shell: &str) -> Result<ExitStatus> {
    let status = Command::new(shell)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("failed to start `{shell}` in {}", dir.display()))?;
    tracing::info!(shell, %status, "shell exited");
    Ok(status)
}
