//! Destination host allowlist.
//!
//! # Responsibilities
//! - Decide allow/deny for a target hostname
//! - Match exact entries and subdomains of entries
//! - Never match bare substrings (evilyoutube.com must not pass)
//!
//! # Design Decisions
//! - Hostname matching is case-insensitive (per DNS); entries are
//!   lowercased once at construction
//! - Subdomain matching is a suffix match on "." + entry
//! - The allowlist is immutable after construction

/// Hosts the proxy will forward to when no explicit allowlist is configured.
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &[
    "www.youtube.com",
    "youtube.com",
    "i.ytimg.com",
    "www.google.com",
    "googlevideo.com",
    "m.youtube.com",
    "ytimg.com",
    "yt3.ggpht.com",
    "yt3.googleusercontent.com",
];

/// Immutable set of permitted destination hosts.
#[derive(Debug, Clone)]
pub struct HostAllowlist {
    entries: Vec<String>,
}

impl HostAllowlist {
    /// Create an allowlist from hostname entries.
    /// Entries are normalized to lowercase for case-insensitive matching.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|e| e.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Returns true if `host` equals an entry or is a subdomain of one.
    /// Empty hostnames are always denied.
    pub fn allows(&self, host: &str) -> bool {
        if host.is_empty() {
            return false;
        }
        let host = host.to_ascii_lowercase();
        self.entries.iter().any(|entry| {
            host == *entry
                || host
                    .strip_suffix(entry.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

impl Default for HostAllowlist {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_HOSTS.iter().copied())
    }
}
