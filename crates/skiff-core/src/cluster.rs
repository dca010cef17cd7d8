//! Cluster records: name, git endpoint, and deploy key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One configured cluster the CLI can deploy to.
///
/// A cluster exposes its hosted git endpoint either over HTTPS on a
/// `git.` subdomain of `domain`, or over SSH directly on `git_host`.
/// When both are configured the domain endpoint wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    git_host: Option<String>,
    key: String,
}

impl Cluster {
    /// Create a cluster with no git endpoint configured.
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: None,
            git_host: None,
            key: key.into(),
        }
    }

    /// Set the cluster's base domain (HTTPS git endpoint `git.<domain>`).
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the cluster's SSH git host.
    #[must_use]
    pub fn with_git_host(mut self, git_host: impl Into<String>) -> Self {
        self.git_host = Some(git_host.into());
        self
    }

    /// Cluster name, unique within a registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base domain, if configured. An empty string counts as absent.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref().filter(|d| !d.is_empty())
    }

    /// SSH git host, if configured. An empty string counts as absent.
    pub fn git_host(&self) -> Option<&str> {
        self.git_host.as_deref().filter(|h| !h.is_empty())
    }

    /// Deploy key used as the git password for this cluster.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
