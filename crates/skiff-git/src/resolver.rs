//! Resolving git remotes to a deployed app.
//!
//! A repository may carry several remotes; at most one app answer comes
//! out. An explicitly named remote is authoritative, then the remote
//! pinned in local git config, then whatever the push remotes agree on.

use tracing::debug;

use skiff_core::Cluster;

use crate::client::GitClient;
use crate::errors::ResolveError;
use crate::remote::{Direction, Remote};
use crate::urls::{self, AppIdentity};

/// Local git config key naming the preferred remote for resolution.
pub const PREFERRED_REMOTE_KEY: &str = "skiff.remote";

/// Resolves remotes of one repository against a set of clusters.
#[derive(Debug)]
pub struct Resolver<'a> {
    client: &'a GitClient,
    clusters: &'a [Cluster],
}

impl<'a> Resolver<'a> {
    /// Create a resolver over a git client and an ordered cluster slice.
    pub fn new(client: &'a GitClient, clusters: &'a [Cluster]) -> Self {
        Self { client, clusters }
    }

    /// Resolve the app this repository deploys to.
    ///
    /// An explicitly named remote is tried first, then the remote named
    /// by the `skiff.remote` config key, then the implicit scan over all
    /// push remotes.
    ///
    /// # Errors
    ///
    /// Returns an error when no unambiguous app can be determined.
    pub async fn resolve(&self, named: Option<&str>) -> Result<AppIdentity, ResolveError> {
        if let Some(remote) = named {
            return self.resolve_by_name(remote).await;
        }
        if let Some(remote) = self.preferred_remote().await {
            debug!("resolving via preferred remote {remote}");
            return self.resolve_by_name(&remote).await;
        }
        self.resolve_implicit().await
    }

    /// Resolve the app behind one named remote.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::RemoteNotFound`] if the remote has no URL
    /// configured and [`ResolveError::AppNotRecognized`] if its URL does
    /// not point at any configured cluster.
    pub async fn resolve_by_name(&self, remote: &str) -> Result<AppIdentity, ResolveError> {
        let key = format!("remote.{remote}.url");
        match self.client.config_get(&key).await? {
            Some(url) => urls::app_from_url(&url, self.clusters).ok_or_else(|| {
                ResolveError::AppNotRecognized {
                    remote: remote.to_string(),
                }
            }),
            None => Err(ResolveError::RemoteNotFound {
                remote: remote.to_string(),
                working_dir: working_dir(),
            }),
        }
    }

    /// The remote named by the `skiff.remote` config key, if any.
    ///
    /// Lookup failures are deliberately swallowed: a missing or broken
    /// config key only means there is no preference.
    pub async fn preferred_remote(&self) -> Option<String> {
        let name = self.client.config_get(PREFERRED_REMOTE_KEY).await.ok()??;
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    /// Scan all push remotes for apps hosted on the configured clusters.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoAppFound`] when nothing matches (or the
    /// listing itself fails) and [`ResolveError::AmbiguousRemotes`] when
    /// more than one remote qualifies.
    pub async fn resolve_implicit(&self) -> Result<AppIdentity, ResolveError> {
        let remotes = match self.client.remotes().await {
            Ok(remotes) => remotes,
            Err(e) => {
                debug!("listing git remotes failed: {e}");
                return Err(ResolveError::NoAppFound);
            }
        };
        select_app(&remotes, self.clusters)
    }
}

/// Pick the single app the push remotes point at.
///
/// Matching entries are keyed by remote name; a later push URL for the
/// same name replaces the earlier one. Zero matches and more than one
/// distinct matching remote are both errors.
///
/// # Errors
///
/// Returns [`ResolveError::NoAppFound`] or
/// [`ResolveError::AmbiguousRemotes`] accordingly.
pub fn select_app(remotes: &[Remote], clusters: &[Cluster]) -> Result<AppIdentity, ResolveError> {
    let mut matches: Vec<(String, AppIdentity)> = Vec::new();
    for remote in remotes {
        if remote.direction != Direction::Push {
            continue;
        }
        let Some(identity) = urls::app_from_url(&remote.url, clusters) else {
            continue;
        };
        match matches.iter_mut().find(|(name, _)| *name == remote.name) {
            Some(entry) => entry.1 = identity,
            None => matches.push((remote.name.clone(), identity)),
        }
    }

    match matches.len() {
        0 => Err(ResolveError::NoAppFound),
        1 => {
            let (_, identity) = matches.swap_remove(0);
            Ok(identity)
        }
        _ => Err(ResolveError::AmbiguousRemotes(
            matches.into_iter().map(|(name, _)| name).collect(),
        )),
    }
}

fn working_dir() -> String {
    std::env::current_dir()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn push(name: &str, url: &str) -> Remote {
        Remote {
            name: name.to_string(),
            url: url.to_string(),
            direction: Direction::Push,
        }
    }

    fn fetch(name: &str, url: &str) -> Remote {
        Remote {
            name: name.to_string(),
            url: url.to_string(),
            direction: Direction::Fetch,
        }
    }

    fn clusters() -> Vec<Cluster> {
        vec![
            Cluster::new("production", "k1").with_domain("example.com"),
            Cluster::new("staging", "k2").with_git_host("staging.internal"),
        ]
    }

    #[test]
    fn test_should_select_single_matching_remote() {
        let remotes = vec![
            fetch("production", "https://git.example.com/myapp.git"),
            push("production", "https://git.example.com/myapp.git"),
            push("origin", "https://github.com/me/myapp.git"),
        ];

        let identity = select_app(&remotes, &clusters()).unwrap();
        assert_eq!(identity.app(), "myapp");
        assert_eq!(identity.cluster().name(), "production");
    }

    #[test]
    fn test_should_fail_when_no_remote_matches() {
        let remotes = vec![push("origin", "https://github.com/me/myapp.git")];
        let err = select_app(&remotes, &clusters()).unwrap_err();
        assert!(matches!(err, ResolveError::NoAppFound));
    }

    #[test]
    fn test_should_fail_on_empty_remote_list() {
        let err = select_app(&[], &clusters()).unwrap_err();
        assert!(matches!(err, ResolveError::NoAppFound));
    }

    #[test]
    fn test_should_ignore_fetch_only_matches() {
        let remotes = vec![fetch("production", "https://git.example.com/myapp.git")];
        let err = select_app(&remotes, &clusters()).unwrap_err();
        assert!(matches!(err, ResolveError::NoAppFound));
    }

    #[test]
    fn test_should_report_all_ambiguous_remotes() {
        let remotes = vec![
            push("production", "https://git.example.com/myapp.git"),
            push("staging", "ssh://git@staging.internal/myapp.git"),
        ];

        let err = select_app(&remotes, &clusters()).unwrap_err();
        let ResolveError::AmbiguousRemotes(mut names) = err else {
            panic!("expected AmbiguousRemotes, got {err}");
        };
        names.sort();
        assert_eq!(names, vec!["production", "staging"]);
    }

    #[test]
    fn test_should_keep_last_push_url_per_remote_name() {
        let remotes = vec![
            push("production", "https://git.example.com/old.git"),
            push("production", "https://git.example.com/new.git"),
        ];

        let identity = select_app(&remotes, &clusters()).unwrap();
        assert_eq!(identity.app(), "new");
    }

    #[test]
    fn test_should_not_treat_same_remote_twice_as_ambiguous() {
        // A remote with separate fetch and push URLs is still one remote.
        let remotes = vec![
            push("production", "https://git.example.com/myapp.git"),
            push("production", "https://git.example.com/myapp.git"),
        ];

        let identity = select_app(&remotes, &clusters()).unwrap();
        assert_eq!(identity.app(), "myapp");
    }
}
