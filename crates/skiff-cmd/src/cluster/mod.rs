//! Cluster commands (`skiff cluster`).
//!
//! Manage the local cluster registry: add, list, and remove entries,
//! along with the git configuration that backs HTTPS deploys.

pub mod add;
pub mod list;
pub mod remove;

use clap::Subcommand;

use crate::factory::Factory;

/// Cluster subcommands.
#[derive(Debug, Subcommand)]
pub enum ClusterCommand {
    /// Register a cluster.
    Add(add::AddArgs),
    /// List registered clusters.
    #[command(alias = "ls")]
    List(list::ListArgs),
    /// Remove a registered cluster.
    Remove(remove::RemoveArgs),
}

impl ClusterCommand {
    /// Run the appropriate cluster subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the subcommand fails.
    pub async fn run(self, factory: &Factory) -> anyhow::Result<()> {
        match self {
            Self::Add(args) => args.run(factory).await,
            Self::List(args) => args.run(factory),
            Self::Remove(args) => args.run(factory).await,
        }
    }
}
