//! Register a cluster in the local registry.

use std::path::PathBuf;

use clap::Args;
use console::style;
use skiff_core::{Cluster, Config, ca_cert_dir};
use skiff_git::setup;

use crate::factory::Factory;

/// Register a cluster, optionally wiring git up for HTTPS deploys.
///
/// With `--domain`, the CA bundle is copied into the skiff config
/// directory and git's global configuration gains the sslCAInfo and
/// credential helper entries for the cluster endpoint.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Name for the cluster.
    name: String,
    /// Controller key, served to git as the deploy password.
    key: String,
    /// Domain of the cluster's HTTPS git endpoint.
    #[arg(short = 'd', long, requires = "ca_file")]
    domain: Option<String>,
    /// Host of the cluster's SSH git endpoint.
    #[arg(short = 'g', long, value_name = "HOST")]
    git_host: Option<String>,
    /// CA certificate bundle for the HTTPS endpoint.
    #[arg(long, value_name = "PATH")]
    ca_file: Option<PathBuf>,
    /// Replace an existing cluster with the same name.
    #[arg(short, long)]
    force: bool,
}

impl AddArgs {
    /// Run the add command.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be updated or the git
    /// configuration cannot be installed.
    pub async fn run(&self, factory: &Factory) -> anyhow::Result<()> {
        let mut cluster = Cluster::new(self.name.clone(), self.key.clone());
        if let Some(ref domain) = self.domain {
            cluster = cluster.with_domain(domain);
        }
        if let Some(ref git_host) = self.git_host {
            cluster = cluster.with_git_host(git_host);
        }

        let mut config = Config::load()?;
        if self.force {
            config.upsert(cluster.clone());
        } else {
            config.add(cluster.clone())?;
        }
        config.save()?;
        println!("{} Added cluster {}", style("✓").green(), cluster.name());

        if let (Some(domain), Some(ca_file)) = (cluster.domain(), self.ca_file.as_deref()) {
            let ca_dest = ca_cert_dir().join(format!("{}.pem", cluster.name()));
            if let Some(parent) = ca_dest.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::copy(ca_file, &ca_dest).await?;

            let helper_exe = std::env::current_exe()?;
            setup::install(factory.git_client()?, domain, &ca_dest, &helper_exe).await?;
            println!(
                "{} Configured git credentials for git.{domain}",
                style("✓").green()
            );
        }

        Ok(())
    }
}
