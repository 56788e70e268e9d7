// ~/.config/worktree-manager/config.json
// ref: serde_json, https://docs.rs/serde_json/

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_WORKTREE_DIR: &str = ".worktrees";
pub const DEFAULT_SHELL: &str = "/bin/bash";
const CONFIG_DIR_NAME: &str = "worktree-manager";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Where new worktrees go. Relative paths are resolved against the repo root.
    #[serde(default)]
    pub worktree_dir: Option<String>,
    #[serde(default)]
    pub shell: Option<String>,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load from the platform config dir. Never fails: a missing or broken
    /// file yields the empty configuration.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read config");
                return Self::default();
            }
        };
        serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
            Self::default()
        })
    }

    /// Directory new worktrees are created under.
    pub fn storage_dir(&self, repo_root: &Path) -> PathBuf {
        let dir = self
            .worktree_dir
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_WORKTREE_DIR);
        let dir = Path::new(dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            repo_root.join(dir)
        }
    }

    /// Configured shell, then `$SHELL`, then /bin/bash.
    pub fn shell(&self, env_shell: Option<String>) -> String {
        self.shell
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| env_shell.filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_SHELL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::load_from(&dir.path().join("nope.json")), Config::default());
    }

    #[test]
    fn malformed_file_is_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn reads_both_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "worktree_dir": "../trees", "shell": "/bin/zsh" }"#).unwrap();
        let config = Config::load_from(&path);
        assert_eq!(config.worktree_dir.as_deref(), Some("../trees"));
        assert_eq!(config.shell.as_deref(), Some("/bin/zsh"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "shell": "/bin/fish", "theme": "dark" }"#).unwrap();
        let config = Config::load_from(&path);
        assert_eq!(config.worktree_dir, None);
        assert_eq!(config.shell.as_deref(), Some("/bin/fish"));
    }

    #[test]
    fn storage_dir_resolution() {
        let root = Path::new("/src/repo");
        assert_eq!(Config::default().storage_dir(root), PathBuf::from("/src/repo/.worktrees"));

        let rel = Config { worktree_dir: Some("trees".into()), ..Config::default() };
        assert_eq!(rel.storage_dir(root), PathBuf::from("/src/repo/trees"));

        let abs = Config { worktree_dir: Some("/var/trees".into()), ..Config::default() };
        assert_eq!(abs.storage_dir(root), PathBuf::from("/var/trees"));
    }

    #[test]
    fn shell_fallback_chain() {
        let configured = Config { shell: Some("/bin/fish".into()), ..Config::default() };
        assert_eq!(configured.shell(Some("/bin/zsh".into())), "/bin/fish");
        assert_eq!(Config::default().shell(Some("/bin/zsh".into())), "/bin/zsh");
        assert_eq!(Config::default().shell(Some(" ".into())), DEFAULT_SHELL);
        assert_eq!(Config::default().shell(None), DEFAULT_SHELL);
    }
}
