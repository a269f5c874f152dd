// src/github/client.rs
// =============================================================================
// This module talks to GitHub over HTTP.
//
// Two kinds of requests:
// - Directory listings from the contents API:
//     GET {api_root}/repos/{owner}/{repo}/contents/{path}
// - Raw downloads of whatever URL the listing (or the fallback) gives us
//
// The finder and the runner never use GitHubClient directly. They go
// through the RepoHost trait, so tests can swap in an in-memory host.
//
// Requests are awaited one after another. Nothing here retries.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::slug::RepoSlug;

/// Default GitHub REST API root
pub const DEFAULT_API_ROOT: &str = "https://api.github.com";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_BINARY: &str = "application/octet-stream";

/// Errors from listing or downloading
#[derive(Debug, Error)]
pub enum FetchError {
    /// The host answered 404. For listings this means "no logo here".
    #[error("not found: {url}")]
    NotFound { url: String },

    /// Any other non-success HTTP status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Connection, TLS, timeout or body decoding failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API root can't have path segments appended (e.g. "mailto:x")
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

/// What kind of thing a directory entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// symlink, submodule, anything GitHub adds later
    #[serde(other)]
    Other,
}

/// One entry of a contents API listing
///
/// GitHub sends many more fields (sha, size, html_url, ...); serde
/// ignores the ones we don't declare.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// The two operations the logo search needs from a repository host
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Lists a directory of the repository. `path` is "" for the root.
    async fn list_directory(
        &self,
        slug: &RepoSlug,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>, FetchError>;

    /// Downloads the raw bytes behind a URL
    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// reqwest-backed GitHub client
///
/// The token is read once at startup and passed in here; it is never
/// changed afterwards.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_root: Url,
    token: Option<String>,
}

impl GitHubClient {
    /// Builds a client against the public GitHub API
    ///
    /// `timeout` of None keeps reqwest's default (no overall timeout).
    pub fn new(token: Option<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        // Treat an empty GITHUB_TOKEN the same as no token
        let token = token.filter(|t| !t.trim().is_empty());

        Ok(Self {
            http: builder.build()?,
            api_root: parse_api_root(DEFAULT_API_ROOT)?,
            token,
        })
    }

    /// Points the client at another API root (GitHub Enterprise, test servers)
    pub fn with_api_root(mut self, api_root: &str) -> Result<Self, FetchError> {
        self.api_root = parse_api_root(api_root)?;
        Ok(self)
    }

    /// Builds the contents API URL for a directory
    ///
    /// Each component of `path` becomes its own percent-encoded segment,
    /// so "docs/my logos" -> ".../contents/docs/my%20logos".
    pub fn contents_url(&self, slug: &RepoSlug, path: &str) -> Result<Url, FetchError> {
        let mut url = self.api_root.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| FetchError::InvalidUrl {
                url: self.api_root.to_string(),
            })?;
            segments
                .pop_if_empty()
                .extend(["repos", slug.owner.as_str(), slug.repo.as_str(), "contents"])
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    // Sends a GET and turns non-success statuses into FetchError
    async fn get(&self, url: &str, accept: &str) -> Result<reqwest::Response, FetchError> {
        let mut request = self.http.get(url).header(ACCEPT, accept);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl RepoHost for GitHubClient {
    async fn list_directory(
        &self,
        slug: &RepoSlug,
        path: &str,
    ) -> Result<Vec<DirectoryEntry>, FetchError> {
        let url = self.contents_url(slug, path)?;
        let response = self.get(url.as_str(), ACCEPT_JSON).await?;
        Ok(response.json::<Vec<DirectoryEntry>>().await?)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url, ACCEPT_BINARY).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

fn parse_api_root(api_root: &str) -> Result<Url, FetchError> {
    let url = Url::parse(api_root).map_err(|_| FetchError::InvalidUrl {
        url: api_root.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(FetchError::InvalidUrl {
            url: api_root.to_string(),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GitHubClient {
        GitHubClient::new(None, None).unwrap()
    }

    #[test]
    fn test_contents_url_root() {
        let url = client()
            .contents_url(&RepoSlug::new("foo", "bar"), "")
            .unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/repos/foo/bar/contents");
    }

    #[test]
    fn test_contents_url_nested_path_is_encoded() {
        let url = client()
            .contents_url(&RepoSlug::new("foo", "bar"), "docs/my logos")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/foo/bar/contents/docs/my%20logos"
        );
    }

    #[test]
    fn test_contents_url_custom_root_with_prefix() {
        let client = client()
            .with_api_root("https://ghe.example.com/api/v3/")
            .unwrap();
        let url = client
            .contents_url(&RepoSlug::new("foo", "bar"), "assets")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/foo/bar/contents/assets"
        );
    }

    #[test]
    fn test_invalid_api_root() {
        assert!(matches!(
            client().with_api_root("mailto:someone@example.com"),
            Err(FetchError::InvalidUrl { .. })
        ));
        assert!(matches!(
            client().with_api_root("not a url"),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_empty_token_is_dropped() {
        let client = GitHubClient::new(Some("  ".to_string()), None).unwrap();
        assert!(client.token.is_none());
    }

    #[test]
    fn test_directory_entry_from_github_json() {
        let json = r#"[
            {"name": "logo.svg", "path": "logo.svg", "type": "file",
             "download_url": "https://raw.githubusercontent.com/foo/bar/main/logo.svg"},
            {"name": "assets", "path": "assets", "type": "dir", "download_url": null},
            {"name": "vendor", "path": "vendor", "type": "submodule"}
        ]"#;
        let entries: Vec<DirectoryEntry> = serde_json::from_str(json).unwrap();

        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(
            entries[0].download_url.as_deref(),
            Some("https://raw.githubusercontent.com/foo/bar/main/logo.svg")
        );
        assert_eq!(entries[1].kind, EntryKind::Dir);
        assert_eq!(entries[1].download_url, None);
        assert_eq!(entries[2].kind, EntryKind::Other);
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on port 1
        let client = client().with_api_root("http://127.0.0.1:1").unwrap();
        let err = client
            .list_directory(&RepoSlug::new("foo", "bar"), "")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));

        let err = client.download("http://127.0.0.1:1/logo.png").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
