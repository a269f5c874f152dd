// src/github/mod.rs
// =============================================================================
// This module handles everything GitHub-specific:
// - Parsing repository URLs into owner/repo pairs (slug.rs)
// - Listing repository directories and downloading files (client.rs)
//
// The RepoHost trait is the seam between the logo search and the network.
// =============================================================================

mod client;
mod slug;

#[cfg(test)]
pub mod fake;

pub use client::{DirectoryEntry, EntryKind, FetchError, GitHubClient, RepoHost, DEFAULT_API_ROOT};
pub use slug::{parse_repo_slug, RepoSlug};
