//! Factory for shared command dependencies.
//!
//! Provides lazy initialization of the cluster registry and the git
//! client, and carries the parsed global flag values. Each dependency
//! is created at most once per process.

use std::sync::OnceLock;

use skiff_core::{Cluster, Config, ConfigError};
use skiff_git::client::GitClient;
use tracing::debug;

/// Shared factory providing lazily-initialized dependencies to all
/// commands.
#[derive(Debug, Default)]
pub struct Factory {
    app_override: Option<String>,
    cluster_filter: Option<String>,
    config: OnceLock<Config>,
    git_client: OnceLock<GitClient>,
    in_repo: OnceLock<bool>,
}

impl Factory {
    /// Create a new factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global `-a/--app` override.
    #[must_use]
    pub fn with_app_override(mut self, app: impl Into<String>) -> Self {
        self.app_override = Some(app.into());
        self
    }

    /// Restrict cluster matching to one named cluster (`-c/--cluster`).
    #[must_use]
    pub fn with_cluster_filter(mut self, cluster: impl Into<String>) -> Self {
        self.cluster_filter = Some(cluster.into());
        self
    }

    /// Set a pre-loaded registry, bypassing the config file.
    #[must_use]
    pub fn with_config(self, config: Config) -> Self {
        // Ignore set error - another thread may have set it first
        let _ = self.config.set(config);
        self
    }

    /// The explicit app named with the global `-a` flag, if any.
    pub fn app_override(&self) -> Option<&str> {
        self.app_override.as_deref()
    }

    /// Get the cluster registry, loading it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry file cannot be read or parsed.
    pub fn config(&self) -> anyhow::Result<&Config> {
        if let Some(config) = self.config.get() {
            return Ok(config);
        }
        let config = Config::load()?;
        // Ignore set error - another thread may have set it first
        let _ = self.config.set(config);
        self.config
            .get()
            .ok_or_else(|| anyhow::anyhow!("failed to initialize config"))
    }

    /// The clusters resolution should consider, honoring the scope
    /// filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be loaded or the filter
    /// names an unregistered cluster.
    pub fn clusters(&self) -> anyhow::Result<Vec<Cluster>> {
        let config = self.config()?;
        match self.cluster_filter.as_deref() {
            Some(name) => {
                let cluster = config
                    .cluster(name)
                    .ok_or_else(|| ConfigError::UnknownCluster(name.to_string()))?;
                Ok(vec![cluster.clone()])
            }
            None => Ok(config.clusters().to_vec()),
        }
    }

    /// Get the git client.
    ///
    /// # Errors
    ///
    /// Returns an error if git is not available.
    pub fn git_client(&self) -> anyhow::Result<&GitClient> {
        if let Some(client) = self.git_client.get() {
            return Ok(client);
        }
        let client = GitClient::new()?;
        // Ignore set error - another thread may have set it first
        let _ = self.git_client.set(client);
        self.git_client
            .get()
            .ok_or_else(|| anyhow::anyhow!("failed to initialize git client"))
    }

    /// Whether the working directory is inside a git repository.
    ///
    /// Computed once per process; any failure counts as "not a
    /// repository".
    pub async fn in_git_repo(&self) -> bool {
        if let Some(flag) = self.in_repo.get() {
            return *flag;
        }
        let flag = match self.git_client() {
            Ok(client) => client.is_repo().await.unwrap_or(false),
            Err(e) => {
                debug!("git unavailable, treating as outside a repository: {e}");
                false
            }
        };
        // Ignore set error - another thread may have set it first
        let _ = self.in_repo.set(flag);
        flag
    }
}
