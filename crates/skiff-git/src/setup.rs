//! Global git configuration for cluster endpoints.
//!
//! Each domain-based cluster gets two global git config entries: the
//! TLS trust anchor for its git endpoint and this executable as the
//! credential helper for it. With both in place, `git push` to the
//! cluster works out of the box.

use std::path::Path;

use tracing::debug;

use crate::client::GitClient;
use crate::errors::GitError;

/// Host pattern of a cluster's git endpoint, as git config keys use it.
fn host_pattern(domain: &str) -> String {
    format!("https://git.{domain}")
}

/// Config key holding the CA bundle path for a cluster endpoint.
pub fn ca_info_key(domain: &str) -> String {
    format!("http.{}.sslCAInfo", host_pattern(domain))
}

/// Config key holding the credential helper for a cluster endpoint.
pub fn helper_key(domain: &str) -> String {
    format!("credential.{}.helper", host_pattern(domain))
}

/// Credential helper invocation: this executable plus the hidden
/// protocol subcommand.
pub fn helper_value(helper_exe: &Path) -> String {
    format!("{} git-credentials", helper_exe.display())
}

/// Install the global git configuration for a cluster endpoint.
///
/// # Errors
///
/// Returns an error if either config entry cannot be written.
pub async fn install(
    client: &GitClient,
    domain: &str,
    ca_file: &Path,
    helper_exe: &Path,
) -> Result<(), GitError> {
    client
        .config_set_global(&ca_info_key(domain), &ca_file.display().to_string())
        .await?;
    client
        .config_set_global(&helper_key(domain), &helper_value(helper_exe))
        .await
}

/// Remove the global git configuration for a cluster endpoint.
///
/// Removal is best-effort: sections that are already gone, or fail to
/// be removed, are only logged.
pub async fn uninstall(client: &GitClient, domain: &str) {
    let pattern = host_pattern(domain);
    for section in [format!("http.{pattern}"), format!("credential.{pattern}")] {
        if let Err(e) = client.remove_section_global(&section).await {
            debug!("removing git config section {section} failed: {e}");
        }
    }
}
