// src/github/slug.rs
// =============================================================================
// This module turns a GitHub repository URL into an owner/repo pair.
//
// Accepted:
//   - https://github.com/owner/repo
//   - https://www.github.com/owner/repo.git
//   - https://github.com/owner/repo/tree/main/extra  (extra segments ignored)
//
// Anything else (other hosts, missing repo segment, not a URL at all)
// returns None. This never fails loudly: the catalog can list URLs we
// simply don't know how to use.
// =============================================================================

use std::fmt;
use url::Url;

/// Hosts we treat as GitHub
const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

/// An owner/repo pair, e.g. ("rust-lang", "rust")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

// Parses a GitHub URL to extract owner and repository name
//
// Returns: Some(RepoSlug) for github.com URLs with at least two path
// segments, None otherwise
//
// Example:
//   "https://github.com/rust-lang/rust.git" -> rust-lang/rust
pub fn parse_repo_slug(url: &str) -> Option<RepoSlug> {
    let parsed = Url::parse(url).ok()?;

    // Host comparison is case-insensitive (Url lowercases it). Ports and
    // credentials are not part of a repository URL.
    let host = parsed.host_str()?;
    if !GITHUB_HOSTS.contains(&host)
        || parsed.port().is_some()
        || !parsed.username().is_empty()
        || parsed.password().is_some()
    {
        return None;
    }

    // path_segments() is None for URLs like "mailto:" that have no path
    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let repo = segments.next()?;

    // Only strip a real ".git" suffix, never individual characters
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if repo.is_empty() {
        return None;
    }

    Some(RepoSlug::new(owner, repo))
}
