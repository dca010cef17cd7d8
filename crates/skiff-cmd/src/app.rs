//! App command (`skiff app`).
//!
//! Prints the app the current git repository deploys to, resolved from
//! its configured remotes.

use anyhow::bail;
use clap::Args;
use skiff_git::resolver::Resolver;

use crate::factory::Factory;

/// Show which app this repository belongs to.
#[derive(Debug, Args)]
pub struct AppArgs {
    /// Resolve through this git remote instead of scanning all remotes.
    #[arg(short, long, value_name = "REMOTE")]
    remote: Option<String>,
}

impl AppArgs {
    /// Run the app command.
    ///
    /// # Errors
    ///
    /// Returns an error outside a git repository, or when the remotes
    /// do not resolve to exactly one app.
    pub async fn run(&self, factory: &Factory) -> anyhow::Result<()> {
        if let Some(app) = factory.app_override() {
            println!("{app}");
            return Ok(());
        }
        if !factory.in_git_repo().await {
            bail!("not in a git repository (pass -a APP to name an app explicitly)");
        }

        let clusters = factory.clusters()?;
        let resolver = Resolver::new(factory.git_client()?, &clusters);
        let identity = resolver.resolve(self.remote.as_deref()).await?;
        println!("{identity}");
        Ok(())
    }
}
