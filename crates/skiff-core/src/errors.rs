//! Core error types for the skiff CLI.

/// Errors from loading or mutating the cluster registry.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Failed to read the registry file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path of the registry file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the registry file.
    #[error("failed to write config file {path}: {source}")]
    WriteFile {
        /// Path of the registry file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the registry file.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// A cluster with this name is already registered.
    #[error("cluster \"{0}\" already exists (use --force to replace it)")]
    DuplicateCluster(String),

    /// No cluster with this name is registered.
    #[error("unknown cluster \"{0}\"")]
    UnknownCluster(String),
}
