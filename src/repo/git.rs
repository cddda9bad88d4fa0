//! Git subprocess runner.
//!
//! All operations shell out to the system `git` binary with
//! `std::process::Command`, inheriting the user's git config.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// Read-only queries the context pipeline needs from version control.
///
/// Each method returns git's raw stdout. Parsing lives in `diff` and `scan`
/// so that tests can feed canned output through a mock.
#[cfg_attr(test, mockall::automock)]
pub trait GitSource {
    /// `git ls-files`
    fn ls_files(&self) -> Result<String, GitError>;

    /// `git branch --show-current`
    fn show_current_branch(&self) -> Result<String, GitError>;

    /// `git diff --cached --diff-algorithm=minimal`
    fn diff_cached(&self) -> Result<Vec<u8>, GitError>;

    /// `git rev-parse --show-toplevel`
    fn show_toplevel(&self) -> Result<String, GitError>;
}

/// [`GitSource`] backed by the real `git` executable, run in `root`.
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a commit from the staged changes with the given message.
    ///
    /// `LANG` is pinned so that non-ASCII messages survive hooks and
    /// editors that read the locale.
    pub fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run_with_env(&["commit", "-m", message], &[("LANG", "en_US.UTF-8")])
            .map(|_| ())
    }

    fn run(&self, args: &[&str]) -> Result<Vec<u8>, GitError> {
        self.run_with_env(args, &[])
    }

    /// Run a git command and return stdout or a descriptive error.
    fn run_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> Result<Vec<u8>, GitError> {
        let command = args.first().copied().unwrap_or_default().to_string();

        if which::which("git").is_err() {
            return Err(GitError::NotInstalled);
        }

        debug!("Running git {} in {}", args.join(" "), self.root.display());

        let output = Command::new("git")
            .args(args)
            .envs(envs.iter().copied())
            .current_dir(&self.root)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.is_empty() {
                // git commit reports hook and "nothing to commit" failures on stdout
                stderr = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            return Err(GitError::NonZeroExit {
                command,
                code: output.status.code(),
                stderr,
            });
        }

        Ok(output.stdout)
    }
}

impl GitSource for GitCli {
    fn ls_files(&self) -> Result<String, GitError> {
        let stdout = self.run(&["ls-files"])?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    fn show_current_branch(&self) -> Result<String, GitError> {
        let stdout = self.run(&["branch", "--show-current"])?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    fn diff_cached(&self) -> Result<Vec<u8>, GitError> {
        self.run(&["diff", "--cached", "--diff-algorithm=minimal"])
    }

    fn show_toplevel(&self) -> Result<String, GitError> {
        let stdout = self.run(&["rev-parse", "--show-toplevel"])?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}
