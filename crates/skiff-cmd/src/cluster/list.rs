//! List registered clusters.

use anyhow::bail;
use clap::Args;
use skiff_git::urls;

use crate::factory::Factory;

/// List every registered cluster and its git endpoint.
#[derive(Debug, Args)]
pub struct ListArgs {}

impl ListArgs {
    /// Run the list command.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be loaded or is empty.
    pub fn run(&self, factory: &Factory) -> anyhow::Result<()> {
        let config = factory.config()?;
        if config.clusters().is_empty() {
            bail!("no clusters configured (run `skiff cluster add` first)");
        }

        for cluster in config.clusters() {
            let endpoint = urls::cluster_prefix(cluster)
                .unwrap_or_else(|| "(no git endpoint)".to_string());
            println!("{}\t{endpoint}", cluster.name());
        }
        Ok(())
    }
}
