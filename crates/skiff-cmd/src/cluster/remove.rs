//! Remove a cluster from the local registry.

use clap::Args;
use console::style;
use skiff_core::{Config, ConfigError, ca_cert_dir};
use skiff_git::setup;
use tracing::debug;

use crate::factory::Factory;

/// Remove a registered cluster and its git wiring.
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Name of the cluster to remove.
    name: String,
}

impl RemoveArgs {
    /// Run the remove command.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster is unknown or the registry
    /// cannot be saved.
    pub async fn run(&self, factory: &Factory) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        let Some(cluster) = config.remove(&self.name) else {
            return Err(ConfigError::UnknownCluster(self.name.clone()).into());
        };
        config.save()?;

        // Cleanup below is best-effort; the registry entry is already gone.
        if let Some(domain) = cluster.domain()
            && let Ok(client) = factory.git_client()
        {
            setup::uninstall(client, domain).await;
        }
        let ca_file = ca_cert_dir().join(format!("{}.pem", cluster.name()));
        if let Err(e) = tokio::fs::remove_file(&ca_file).await {
            debug!("no CA bundle removed at {}: {e}", ca_file.display());
        }

        println!("{} Removed cluster {}", style("✓").green(), cluster.name());
        Ok(())
    }
}
