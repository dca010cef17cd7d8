//! Git credential protocol handler for `skiff git-credentials`.
//!
//! Implements the credential helper protocol so HTTPS pushes to a
//! cluster's git endpoint authenticate with the cluster's deploy key.
//! A request the helper cannot answer produces no output and a
//! successful exit; git then falls back to prompting.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use tracing::debug;

use skiff_core::Cluster;

/// Handle a git credential helper request.
///
/// Reads the credential request from `input`, looks up the cluster
/// serving the requested host, and writes the response to `output`.
/// Every unanswerable request is silently ignored.
///
/// # Errors
///
/// Returns an error only if writing the response fails.
pub fn handle_credential_request<R: BufRead, W: Write>(
    operation: &str,
    clusters: &[Cluster],
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()> {
    match operation {
        "get" => handle_get(clusters, input, output),
        "store" | "erase" => {
            // Deploy keys live in the registry; there is nothing to store.
            debug!("ignoring credential {operation} request");
            Ok(())
        }
        _ => {
            debug!("unknown credential operation: {operation}");
            Ok(())
        }
    }
}

/// Handle a `get` credential request.
fn handle_get<R: BufRead, W: Write>(
    clusters: &[Cluster],
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()> {
    let Ok(fields) = parse_credential_input(input) else {
        debug!("failed to read credential request");
        return Ok(());
    };

    let protocol = fields.get("protocol").map_or("", String::as_str);
    let host = fields.get("host").map_or("", String::as_str);

    // SSH pushes authenticate with keys, not with this helper.
    if protocol != "https" {
        debug!("skipping non-https credential request for protocol={protocol}");
        return Ok(());
    }

    if host.is_empty() {
        debug!("skipping credential request with no host");
        return Ok(());
    }

    // Cluster git endpoints live on a `git.` subdomain of the domain.
    let domain = host.strip_prefix("git.").unwrap_or(host);

    let Some(cluster) = clusters.iter().find(|c| c.domain() == Some(domain)) else {
        debug!("no cluster configured for domain={domain}");
        return Ok(());
    };

    debug!("providing credential for cluster={}", cluster.name());

    writeln!(output, "protocol=https")?;
    writeln!(output, "username=user")?;
    writeln!(output, "host={host}")?;
    writeln!(output, "password={}", cluster.key())?;

    Ok(())
}

/// Parse credential protocol input into key-value pairs.
///
/// Reads `key=value` lines up to a blank line or end of input; repeated
/// keys keep the last occurrence.
fn parse_credential_input<R: BufRead>(input: &mut R) -> std::io::Result<HashMap<String, String>> {
    let mut fields = HashMap::new();

    for line in input.lines() {
        let line = line?;
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once('=') {
            fields.insert(key.to_string(), value.to_string());
        }
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use std::io;

    use pretty_assertions::assert_eq;

    use super::*;

    fn respond(operation: &str, clusters: &[Cluster], input: &str) -> String {
        let mut reader = io::Cursor::new(input.as_bytes());
        let mut output = Vec::new();
        handle_credential_request(operation, clusters, &mut reader, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_should_answer_get_for_known_domain() {
        let clusters = vec![Cluster::new("production", "abc123").with_domain("example.com")];

        let response = respond("get", &clusters, "protocol=https\nhost=git.example.com\n\n");

        assert_eq!(
            response,
            "protocol=https\nusername=user\nhost=git.example.com\npassword=abc123\n",
        );
    }

    #[test]
    fn test_should_stay_silent_for_ssh_protocol() {
        let clusters = vec![Cluster::new("production", "abc123").with_domain("example.com")];

        let response = respond("get", &clusters, "protocol=ssh\nhost=git.example.com\n\n");

        assert_eq!(response, "");
    }

    #[test]
    fn test_should_stay_silent_for_unknown_domain() {
        let clusters = vec![Cluster::new("production", "abc123").with_domain("example.com")];

        let response = respond("get", &clusters, "protocol=https\nhost=git.other.com\n\n");

        assert_eq!(response, "");
    }

    #[test]
    fn test_should_stay_silent_without_host() {
        let clusters = vec![Cluster::new("production", "abc123").with_domain("example.com")];

        let response = respond("get", &clusters, "protocol=https\n\n");

        assert_eq!(response, "");
    }

    #[test]
    fn test_should_stay_silent_when_no_cluster_has_domains() {
        let clusters = vec![Cluster::new("staging", "k").with_git_host("staging.internal")];

        let response = respond("get", &clusters, "protocol=https\nhost=git.example.com\n\n");

        assert_eq!(response, "");
    }

    #[test]
    fn test_should_match_host_without_git_subdomain() {
        // The `git.` prefix is stripped when present; a bare domain in
        // the request is looked up as-is.
        let clusters = vec![Cluster::new("production", "abc123").with_domain("example.com")];

        let response = respond("get", &clusters, "protocol=https\nhost=example.com\n\n");

        assert_eq!(
            response,
            "protocol=https\nusername=user\nhost=example.com\npassword=abc123\n",
        );
    }

    #[test]
    fn test_should_answer_request_without_trailing_blank_line() {
        let clusters = vec![Cluster::new("production", "abc123").with_domain("example.com")];

        let response = respond("get", &clusters, "protocol=https\nhost=git.example.com");

        assert_eq!(
            response,
            "protocol=https\nusername=user\nhost=git.example.com\npassword=abc123\n",
        );
    }

    #[test]
    fn test_should_keep_last_occurrence_of_repeated_keys() {
        let clusters = vec![Cluster::new("production", "abc123").with_domain("example.com")];

        let response = respond(
            "get",
            &clusters,
            "protocol=https\nhost=git.wrong.com\nhost=git.example.com\n\n",
        );

        assert_eq!(
            response,
            "protocol=https\nusername=user\nhost=git.example.com\npassword=abc123\n",
        );
    }

    #[test]
    fn test_should_stop_reading_at_blank_line() {
        let clusters = vec![Cluster::new("production", "abc123").with_domain("example.com")];

        let response = respond(
            "get",
            &clusters,
            "protocol=https\nhost=git.example.com\n\nhost=git.other.com\n",
        );

        assert_eq!(
            response,
            "protocol=https\nusername=user\nhost=git.example.com\npassword=abc123\n",
        );
    }

    #[test]
    fn test_should_ignore_store_and_erase_operations() {
        let clusters = vec![Cluster::new("production", "abc123").with_domain("example.com")];

        assert_eq!(respond("store", &clusters, ""), "");
        assert_eq!(respond("erase", &clusters, ""), "");
    }

    #[test]
    fn test_should_ignore_unknown_operations() {
        let clusters = vec![Cluster::new("production", "abc123").with_domain("example.com")];

        assert_eq!(respond("refresh", &clusters, ""), "");
    }

    #[test]
    fn test_should_parse_credential_input() {
        let input = "protocol=https\nhost=git.example.com\npath=myapp.git\n\n";
        let mut reader = io::Cursor::new(input.as_bytes());
        let fields = parse_credential_input(&mut reader).unwrap();

        assert_eq!(fields.get("protocol"), Some(&"https".to_string()));
        assert_eq!(fields.get("host"), Some(&"git.example.com".to_string()));
        assert_eq!(fields.get("path"), Some(&"myapp.git".to_string()));
    }

    #[test]
    fn test_should_skip_lines_without_separator() {
        let input = "noise\nprotocol=https\n\n";
        let mut reader = io::Cursor::new(input.as_bytes());
        let fields = parse_credential_input(&mut reader).unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("protocol"), Some(&"https".to_string()));
    }
}
