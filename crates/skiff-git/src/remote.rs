//! Git remote listing parsers.

/// Direction marker of a `git remote -v` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The remote's fetch URL.
    Fetch,
    /// The remote's push URL.
    Push,
}

impl Direction {
    /// Parse the trailing `(fetch)` / `(push)` marker.
    pub fn parse(marker: &str) -> Option<Self> {
        match marker {
            "(fetch)" => Some(Self::Fetch),
            "(push)" => Some(Self::Push),
            _ => None,
        }
    }
}

/// One parsed line of a verbose remote listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    /// Remote name (e.g., "origin", "production").
    pub name: String,
    /// Remote URL.
    pub url: String,
    /// Whether this line carried the fetch or the push URL.
    pub direction: Direction,
}

/// Parse `git remote` output into remote names.
pub fn parse_remote_names(output: &str) -> Vec<String> {
    output.split_whitespace().map(String::from).collect()
}

/// Parse `git remote -v` output.
///
/// Each well-formed line has exactly three whitespace-separated fields:
/// name, URL, and a direction marker. Anything else is silently
/// skipped; malformed lines are expected in the wild and are not
/// failures.
pub fn parse_remotes_verbose(output: &str) -> Vec<Remote> {
    let mut remotes = Vec::new();
    for line in output.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let &[name, url, marker] = fields.as_slice() else {
            continue;
        };
        let Some(direction) = Direction::parse(marker) else {
            continue;
        };
        remotes.push(Remote {
            name: name.to_string(),
            url: url.to_string(),
            direction,
        });
    }
    remotes
}
