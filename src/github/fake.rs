// src/github/fake.rs
// =============================================================================
// In-memory RepoHost for tests.
//
// Listings and downloads are registered up front; anything not registered
// answers 404. Every call is recorded so tests can check traversal order
// and that no request was made at all.
// =============================================================================

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::client::{DirectoryEntry, EntryKind, FetchError, RepoHost};
use super::slug::RepoSlug;

#[derive(Debug, Clone)]
enum Listing {
    Entries(Vec<DirectoryEntry>),
    Status(u16),
}

#[derive(Debug, Default)]
pub struct FakeHost {
    listings: HashMap<String, Listing>,
    downloads: HashMap<String, Result<Vec<u8>, u16>>,
    calls: Mutex<Vec<String>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the listing for "owner/repo" at `path` ("" = root)
    pub fn dir(mut self, repo: &str, path: &str, entries: Vec<DirectoryEntry>) -> Self {
        self.listings
            .insert(listing_key(repo, path), Listing::Entries(entries));
        self
    }

    /// Makes a listing fail with the given HTTP status
    pub fn failing_dir(mut self, repo: &str, path: &str, status: u16) -> Self {
        self.listings
            .insert(listing_key(repo, path), Listing::Status(status));
        self
    }

    pub fn file(mut self, url: &str, body: &[u8]) -> Self {
        self.downloads.insert(url.to_string(), Ok(body.to_vec()));
        self
    }

    pub fn failing_file(mut self, url: &str, status: u16) -> Self {
        self.downloads.insert(url.to_string(), Err(status));
        self
    }

    /// Every call so far, as "list owner/repo:path" or "get url"
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RepoHost for FakeHost {
    async fn list_directory(
        &self,
        slug: &RepoSlug,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>, FetchError> {
        let key = listing_key(&slug.to_string(), path);
        self.record(format!("list {}", key));

        match self.listings.get(&key) {
            Some(Listing::Entries(entries)) => Ok(entries.clone()),
            Some(Listing::Status(404)) | None => Err(FetchError::NotFound { url: key }),
            Some(Listing::Status(status)) => Err(FetchError::Status {
                url: key,
                status: *status,
            }),
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.record(format!("get {}", url));

        match self.downloads.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(404)) | None => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
        }
    }
}

fn listing_key(repo: &str, path: &str) -> String {
    format!("{}:{}", repo, path)
}

/// A file entry with a download URL
pub fn file_entry(name: &str, download_url: &str) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        kind: EntryKind::File,
        download_url: Some(download_url.to_string()),
    }
}

pub fn dir_entry(name: &str) -> DirectoryEntry {
    DirectoryEntry {
        name: name.to_string(),
        kind: EntryKind::Dir,
        download_url: None,
    }
}
