//! Cluster git URL construction and matching.
//!
//! Every app hosted on a cluster lives at `<prefix><app>.git`, where the
//! prefix is derived from the cluster's endpoint configuration. Matching
//! is the exact inverse: strip the prefix and suffix and validate what
//! is left.

use skiff_core::Cluster;

/// Literal suffix of every hosted app repository URL.
pub const GIT_URL_SUFFIX: &str = ".git";

/// HTTPS URL prefix for a domain-based cluster endpoint.
pub fn https_prefix(domain: &str) -> String {
    format!("https://git.{domain}/")
}

/// SSH URL prefix for a host-based cluster endpoint.
pub fn ssh_prefix(git_host: &str) -> String {
    format!("ssh://git@{git_host}/")
}

/// URL prefix for a cluster's git endpoint, if it has one.
///
/// The domain endpoint wins when both a domain and a git host are
/// configured. A cluster with neither has no endpoint and can never
/// match a URL.
pub fn cluster_prefix(cluster: &Cluster) -> Option<String> {
    if let Some(domain) = cluster.domain() {
        return Some(https_prefix(domain));
    }
    cluster.git_host().map(ssh_prefix)
}

/// Build the git URL for an app hosted on a cluster.
pub fn git_url(cluster: &Cluster, app: &str) -> String {
    let prefix = cluster_prefix(cluster).unwrap_or_default();
    format!("{prefix}{app}{GIT_URL_SUFFIX}")
}

/// An app resolved to the cluster hosting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    cluster: Cluster,
    app: String,
}

impl AppIdentity {
    /// The cluster hosting the app.
    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    /// The app name.
    pub fn app(&self) -> &str {
        &self.app
    }
}

impl std::fmt::Display for AppIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.app)
    }
}

/// Match a URL against clusters, in order, extracting the app name.
///
/// The first cluster whose prefix and the `.git` suffix bracket a valid
/// app name wins; iteration order is the caller's contract. `None`
/// means the URL does not belong to any of the given clusters, which is
/// an ordinary outcome rather than an error.
pub fn app_from_url(url: &str, clusters: &[Cluster]) -> Option<AppIdentity> {
    for cluster in clusters {
        let Some(prefix) = cluster_prefix(cluster) else {
            continue;
        };
        let Some(app) = url
            .strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(GIT_URL_SUFFIX))
        else {
            continue;
        };
        if !valid_app_name(app) {
            continue;
        }
        return Some(AppIdentity {
            cluster: cluster.clone(),
            app: app.to_string(),
        });
    }
    None
}

/// An app name is a single non-empty path segment distinct from the
/// URL suffix.
fn valid_app_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && name != GIT_URL_SUFFIX
}
