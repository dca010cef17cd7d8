//! Git client that wraps the git command-line tool.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::instrument;

use crate::errors::GitError;
use crate::remote::{self, Remote};

/// Client for executing git commands.
#[derive(Debug, Clone)]
pub struct GitClient {
    /// Path to the git binary.
    git_path: PathBuf,
    /// Working directory for git commands.
    repo_dir: Option<PathBuf>,
}

impl GitClient {
    /// Create a new git client using the system git.
    ///
    /// # Errors
    ///
    /// Returns an error if git is not found in PATH.
    pub fn new() -> Result<Self, GitError> {
        let git_path = which::which("git").map_err(|_| GitError::NotFound)?;

        Ok(Self {
            git_path,
            repo_dir: None,
        })
    }

    /// Set the working directory.
    #[must_use]
    pub fn with_repo_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = Some(dir.into());
        self
    }

    /// Get the repository directory, if set.
    pub fn repo_dir(&self) -> Option<&Path> {
        self.repo_dir.as_deref()
    }

    /// Execute a git command and return stdout.
    #[instrument(skip(self), fields(args = ?args))]
    async fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let mut cmd = Command::new(&self.git_path);
        cmd.args(args);

        if let Some(ref dir) = self.repo_dir {
            cmd.current_dir(dir);
        }

        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let command = args.first().copied().unwrap_or("").to_string();
            return Err(GitError::CommandFailed {
                command,
                message: stderr.trim().to_string(),
                exit_code: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// List remote names.
    ///
    /// # Errors
    ///
    /// Returns an error if the git command fails.
    pub async fn remote_names(&self) -> Result<Vec<String>, GitError> {
        let output = self.run(&["remote"]).await?;
        Ok(remote::parse_remote_names(&output))
    }

    /// List remotes with their URLs and directions.
    ///
    /// # Errors
    ///
    /// Returns an error if the git command fails.
    pub async fn remotes(&self) -> Result<Vec<Remote>, GitError> {
        let output = self.run(&["remote", "-v"]).await?;
        Ok(remote::parse_remotes_verbose(&output))
    }

    /// Get a git config value.
    ///
    /// Git signals "key not found" with exit status 1; that outcome is
    /// `Ok(None)` here so callers never inspect exit codes.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than a missing key.
    pub async fn config_get(&self, key: &str) -> Result<Option<String>, GitError> {
        match self.run(&["config", key]).await {
            Ok(output) => Ok(Some(first_line(&output).to_string())),
            Err(GitError::CommandFailed {
                exit_code: Some(1), ..
            }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a global git config value.
    ///
    /// # Errors
    ///
    /// Returns an error if setting the config fails.
    pub async fn config_set_global(&self, key: &str, value: &str) -> Result<(), GitError> {
        self.run(&["config", "--global", key, value]).await?;
        Ok(())
    }

    /// Remove a global git config section.
    ///
    /// # Errors
    ///
    /// Returns an error if the section cannot be removed, including when
    /// it does not exist.
    pub async fn remove_section_global(&self, section: &str) -> Result<(), GitError> {
        self.run(&["config", "--global", "--remove-section", section])
            .await?;
        Ok(())
    }

    /// Check if the working directory is a git repository.
    ///
    /// # Errors
    ///
    /// Returns an error only if the check itself fails (not for non-repo
    /// directories).
    pub async fn is_repo(&self) -> Result<bool, GitError> {
        match self.run(&["rev-parse", "--git-dir"]).await {
            Ok(_) => Ok(true),
            Err(GitError::CommandFailed { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Get the first line of output.
fn first_line(output: &str) -> &str {
    output.lines().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_return_first_line_from_multiline() {
        assert_eq!(first_line("first\nsecond\nthird"), "first");
    }

    #[test]
    fn test_should_return_empty_for_empty_string() {
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn test_should_return_single_line() {
        assert_eq!(first_line("only line"), "only line");
    }

    #[test]
    fn test_should_keep_repo_dir() {
        let client = GitClient {
            git_path: PathBuf::from("/usr/bin/git"),
            repo_dir: None,
        };
        assert!(client.repo_dir().is_none());

        let client = client.with_repo_dir("/tmp/repo");
        assert_eq!(client.repo_dir(), Some(Path::new("/tmp/repo")));
    }
}
