//! Git-related error types.

/// Errors from running the git binary.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// Git command failed with an exit code.
    #[error("git {command} failed: {message}")]
    CommandFailed {
        /// The git subcommand that failed.
        command: String,
        /// Error message from stderr.
        message: String,
        /// Process exit code, if available.
        exit_code: Option<i32>,
    },

    /// Git binary not found.
    #[error("git executable not found in PATH")]
    NotFound,

    /// I/O error from subprocess.
    #[error("git IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from resolving git remotes to a deployed app.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The named remote has no URL configured.
    #[error("could not find git remote {remote} in {working_dir}")]
    RemoteNotFound {
        /// Name of the remote that was looked up.
        remote: String,
        /// Working directory of the lookup, for context.
        working_dir: String,
    },

    /// The remote's URL does not point at any configured cluster.
    #[error("could not find an app in the {remote} git remote")]
    AppNotRecognized {
        /// Name of the remote whose URL did not match.
        remote: String,
    },

    /// More than one remote resolves to a deployed app.
    #[error(
        "multiple apps listed in git remotes, specify one with the global -a option to disambiguate\n\navailable remotes:\n{}",
        .0.join("\n")
    )]
    AmbiguousRemotes(Vec<String>),

    /// No remote resolves to a deployed app.
    #[error("no app found in git remotes")]
    NoAppFound,

    /// Underlying git failure.
    #[error(transparent)]
    Git(#[from] GitError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_display_command_failed() {
        let err = GitError::CommandFailed {
            command: "remote".to_string(),
            message: "fatal: not a git repository".to_string(),
            exit_code: Some(128),
        };
        let msg = err.to_string();
        assert!(msg.contains("remote"));
        assert!(msg.contains("not a git repository"));
    }

    #[test]
    fn test_should_display_not_found() {
        assert!(GitError::NotFound.to_string().contains("not found"));
    }

    #[test]
    fn test_should_convert_io_error() {
        let io_err = std::io::Error::other("spawn failed");
        let err: GitError = io_err.into();
        assert!(matches!(err, GitError::Io(_)));
    }

    #[test]
    fn test_should_display_remote_not_found_with_working_dir() {
        let err = ResolveError::RemoteNotFound {
            remote: "production".to_string(),
            working_dir: "/home/me/app".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not find git remote production in /home/me/app",
        );
    }

    #[test]
    fn test_should_display_app_not_recognized() {
        let err = ResolveError::AppNotRecognized {
            remote: "origin".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not find an app in the origin git remote",
        );
    }

    #[test]
    fn test_should_list_remotes_in_ambiguous_error() {
        let err = ResolveError::AmbiguousRemotes(vec![
            "production".to_string(),
            "staging".to_string(),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("-a option"));
        assert!(msg.contains("production\nstaging"));
    }

    #[test]
    fn test_should_display_no_app_found() {
        assert_eq!(
            ResolveError::NoAppFound.to_string(),
            "no app found in git remotes",
        );
    }

    #[test]
    fn test_should_convert_git_error_to_resolve_error() {
        let err: ResolveError = GitError::NotFound.into();
        assert!(matches!(err, ResolveError::Git(_)));
    }
}
