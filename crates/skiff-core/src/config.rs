//! Cluster registry persistence and config directory resolution.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cluster::Cluster;
use crate::errors::ConfigError;

/// File name of the cluster registry inside the config directory.
const REGISTRY_FILE: &str = "clusters.yml";

/// Configuration directory path (usually ~/.config/skiff).
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SKIFF_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::config_dir().map_or_else(
        || {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
                .join("skiff")
        },
        |d| d.join("skiff"),
    )
}

/// Directory where cluster CA certificate bundles are copied.
pub fn ca_cert_dir() -> PathBuf {
    config_dir().join("ca-certs")
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    clusters: Vec<Cluster>,
}

/// The ordered cluster registry backed by `clusters.yml`.
///
/// Order is load order and is preserved across mutations; resolution
/// iterates clusters in this order, so the first configured match wins.
#[derive(Debug)]
pub struct Config {
    path: PathBuf,
    clusters: Vec<Cluster>,
}

impl Config {
    /// Load the registry from the config directory.
    ///
    /// A missing registry file yields an empty registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_dir().join(REGISTRY_FILE);
        if !path.exists() {
            return Ok(Self {
                path,
                clusters: Vec::new(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;
        let clusters = if content.trim().is_empty() {
            Vec::new()
        } else {
            let file: RegistryFile = serde_yaml::from_str(&content)
                .map_err(|e| ConfigError::Parse(e.to_string()))?;
            file.clusters
        };
        debug!("loaded {} clusters from {}", clusters.len(), path.display());

        Ok(Self { path, clusters })
    }

    /// Create an empty in-memory registry (for testing).
    pub fn empty() -> Self {
        Self {
            path: PathBuf::from("/dev/null"),
            clusters: Vec::new(),
        }
    }

    /// All clusters, in registry order.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Look up a cluster by name.
    pub fn cluster(&self, name: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.name() == name)
    }

    /// Look up the first cluster configured for a domain.
    pub fn cluster_for_domain(&self, domain: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.domain() == Some(domain))
    }

    /// Append a cluster, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateCluster`] if a cluster with the
    /// same name is already registered.
    pub fn add(&mut self, cluster: Cluster) -> Result<(), ConfigError> {
        if self.cluster(cluster.name()).is_some() {
            return Err(ConfigError::DuplicateCluster(cluster.name().to_string()));
        }
        self.clusters.push(cluster);
        Ok(())
    }

    /// Insert a cluster, replacing any existing entry with the same name
    /// in place so registry order is stable.
    pub fn upsert(&mut self, cluster: Cluster) {
        match self.clusters.iter().position(|c| c.name() == cluster.name()) {
            Some(idx) => self.clusters[idx] = cluster,
            None => self.clusters.push(cluster),
        }
    }

    /// Remove a cluster by name, returning the removed record.
    pub fn remove(&mut self, name: &str) -> Option<Cluster> {
        let idx = self.clusters.iter().position(|c| c.name() == name)?;
        Some(self.clusters.remove(idx))
    }

    /// Write the registry back to disk, creating the config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| ConfigError::WriteFile {
                path: dir.display().to_string(),
                source: e,
            })?;
        }
        let file = RegistryFile {
            clusters: self.clusters.clone(),
        };
        let yaml = serde_yaml::to_string(&file).map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(&self.path, yaml).map_err(|e| ConfigError::WriteFile {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}
