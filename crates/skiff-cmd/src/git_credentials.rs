//! Hidden credential-helper endpoint (`skiff git-credentials`).
//!
//! Git invokes this subcommand through the helper entry that
//! `skiff cluster add` writes into the global git configuration. It
//! speaks git's credential helper protocol over stdin/stdout.

use clap::Args;
use skiff_git::credential::handle_credential_request;
use tracing::debug;

use crate::factory::Factory;

/// Answer a git credential helper request.
#[derive(Debug, Args)]
pub struct GitCredentialsArgs {
    /// Operation requested by git (get, store, or erase).
    operation: String,
}

impl GitCredentialsArgs {
    /// Run the credential helper.
    ///
    /// # Errors
    ///
    /// Returns an error only when writing the response fails; every
    /// other failure stays silent so git falls back to prompting.
    pub fn run(&self, factory: &Factory) -> anyhow::Result<()> {
        let Ok(config) = factory.config() else {
            debug!("cluster registry unavailable, staying silent");
            return Ok(());
        };

        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        handle_credential_request(
            &self.operation,
            config.clusters(),
            &mut stdin.lock(),
            &mut stdout.lock(),
        )
    }
}
