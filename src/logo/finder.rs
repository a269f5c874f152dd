// src/logo/finder.rs
// =============================================================================
// This module searches a repository for its logo with a breadth-first walk.
//
// How it works:
// 1. Start with the repository root (depth 0) in a queue
// 2. List the directory at the front of the queue
// 3. Score every image file; keep the first one with the highest score
// 4. Queue subdirectories while depth < max_depth:
//      - from the root, every subdirectory
//      - deeper down, only logo hint directories (assets, docs, ...)
// 5. Repeat until the queue is empty
//
// If no file qualifies we fall back to GitHub's social preview image,
// which always exists as a URL (it may still 404 when downloaded).
//
// A 404 from the listing API stops the walk: the repository (or the
// directory) is gone, which we read as "no logo here", not as an error.
// Any file found before the 404 is discarded and the social preview is
// used instead. Every other error goes back to the caller.
// =============================================================================

use std::collections::VecDeque;
use std::fmt;
use std::path::Path;
use tracing::debug;

use super::score::{has_image_extension, is_logo_dir_hint, score_candidate};
use crate::github::{DirectoryEntry, EntryKind, FetchError, RepoHost, RepoSlug};

/// Social preview image for a repository
const OPENGRAPH_TEMPLATE: &str = "https://opengraph.githubassets.com/1";

/// Extension used when a file has none, and for the social preview
const DEFAULT_EXTENSION: &str = "png";

/// Where a logo candidate came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSource {
    /// A file inside the repository, by repository-relative path
    RepoFile { path: String },
    /// GitHub's generated social preview image
    OpenGraph,
}

/// The logo we decided to download for one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoCandidate {
    pub slug: RepoSlug,
    pub url: String,
    /// Lowercase, without the dot ("svg", "png", ...)
    pub extension: String,
    pub source: LogoSource,
}

/// Provenance, e.g. "foo/bar:assets/logo.svg"
impl fmt::Display for LogoCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            LogoSource::RepoFile { path } => write!(f, "{}:{}", self.slug, path),
            LogoSource::OpenGraph => write!(f, "{} (opengraph fallback)", self.slug),
        }
    }
}

// A directory waiting to be listed
#[derive(Debug, Clone)]
struct QueueItem {
    path: String,
    depth: usize,
}

// The best file seen so far
#[derive(Debug)]
struct Best {
    score: u32,
    entry: DirectoryEntry,
    path: String,
}

// Finds the most logo-like image in a repository
//
// Parameters:
//   host: where to list directories (GitHubClient in production)
//   slug: owner/repo
//   max_depth: how deep to descend (0 = root files only)
//
// Returns:
//   Ok(Some(candidate)) - a repository file, or the social preview fallback
//   Ok(None)           - the best file has no download URL
//   Err(e)             - any listing failure other than 404
pub async fn find_repo_logo<H>(
    host: &H,
    slug: &RepoSlug,
    max_depth: usize,
) -> Result<Option<LogoCandidate>, FetchError>
where
    H: RepoHost + ?Sized,
{
    let mut queue = VecDeque::new();
    queue.push_back(QueueItem {
        path: String::new(),
        depth: 0,
    });

    let mut best: Option<Best> = None;

    while let Some(item) = queue.pop_front() {
        debug!(repo = %slug, path = %item.path, depth = item.depth, "listing directory");

        let entries = match host.list_directory(slug, &item.path).await {
            Ok(entries) => entries,
            Err(FetchError::NotFound { .. }) => {
                // Files seen so far are dropped too
                debug!(repo = %slug, path = %item.path, "listing not found, using social preview");
                return Ok(Some(opengraph_fallback(slug)));
            }
            Err(e) => return Err(e),
        };

        for entry in entries {
            let entry_path = join_path(&item.path, &entry.name);

            match entry.kind {
                EntryKind::Dir => {
                    if item.depth < max_depth
                        && (item.depth == 0 || is_logo_dir_hint(&entry.name))
                    {
                        queue.push_back(QueueItem {
                            path: entry_path,
                            depth: item.depth + 1,
                        });
                    }
                }
                EntryKind::File => {
                    if !has_image_extension(&entry.name) {
                        continue;
                    }
                    let score = score_candidate(&entry.name, &item.path);
                    if score == 0 {
                        continue;
                    }
                    // Strictly greater: on a tie the first file seen stays
                    if best.as_ref().map_or(true, |b| score > b.score) {
                        debug!(repo = %slug, path = %entry_path, score, "new best candidate");
                        best = Some(Best {
                            score,
                            entry,
                            path: entry_path,
                        });
                    }
                }
                EntryKind::Other => {}
            }
        }
    }

    match best {
        Some(best) => {
            let Some(url) = best.entry.download_url else {
                debug!(repo = %slug, path = %best.path, "best candidate has no download URL");
                return Ok(None);
            };
            Ok(Some(LogoCandidate {
                slug: slug.clone(),
                url,
                extension: file_extension(&best.entry.name),
                source: LogoSource::RepoFile { path: best.path },
            }))
        }
        None => Ok(Some(opengraph_fallback(slug))),
    }
}

/// The social preview candidate for a repository
pub fn opengraph_fallback(slug: &RepoSlug) -> LogoCandidate {
    LogoCandidate {
        slug: slug.clone(),
        url: format!("{}/{}/{}", OPENGRAPH_TEMPLATE, slug.owner, slug.repo),
        extension: DEFAULT_EXTENSION.to_string(),
        source: LogoSource::OpenGraph,
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

fn file_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}
