// src/github/client.rs
// =============================================================================
// This module talks to GitHub's REST API.
//
// Three calls are all the analyzer needs:
// - list_contents: GET a directory listing (the "contents" endpoint)
// - fetch_raw:     GET a file's raw text from its download URL
// - fetch_readme:  GET the repository README as raw text
//
// Every call is a single GET. Any non-2xx status becomes
// AnalyzeError::Upstream carrying the status code and the response body, so
// callers can tell a rate limit (403) from a missing repository (404).
// There is no retry logic.
//
// Rust concepts:
// - Traits: ContentSource describes "something that can list and fetch",
//   which lets tests swap GitHub for an in-memory fake
// - async-trait: async fn inside a trait (boxed futures under the hood)
// - serde: GitHub's JSON listing is deserialized straight into structs
// =============================================================================

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde::Deserialize;

use super::repo::RepoRef;
use crate::error::AnalyzeError;

const JSON_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";
const CLIENT_USER_AGENT: &str = concat!("repo-analyzer/", env!("CARGO_PKG_VERSION"));

/// What a listing entry is
///
/// Only files carry a download URL. Submodules and symlinks come back from
/// GitHub as files without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File { download_url: Option<String> },
    Directory,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Base name ("lib.rs")
    pub name: String,
    /// Path from the repository root as GitHub reports it ("src/lib.rs")
    pub path: String,
    /// API URL that lists this entry (for directories: their children)
    pub listing_url: String,
    pub kind: EntryKind,
}

#[cfg(test)]
impl TreeEntry {
    pub fn file(name: &str, path: &str, listing_url: &str, download_url: Option<&str>) -> Self {
        TreeEntry {
            name: name.to_string(),
            path: path.to_string(),
            listing_url: listing_url.to_string(),
            kind: EntryKind::File {
                download_url: download_url.map(str::to_string),
            },
        }
    }

    pub fn directory(name: &str, path: &str, listing_url: &str) -> Self {
        TreeEntry {
            name: name.to_string(),
            path: path.to_string(),
            listing_url: listing_url.to_string(),
            kind: EntryKind::Directory,
        }
    }
}

// Shape of one element of GitHub's contents listing. Only the fields we use.
#[derive(Debug, Deserialize)]
struct ContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    item_type: String,
    url: String,
    download_url: Option<String>,
}

impl From<ContentItem> for TreeEntry {
    fn from(item: ContentItem) -> Self {
        let kind = match item.item_type.as_str() {
            "dir" => EntryKind::Directory,
            _ => EntryKind::File {
                download_url: item.download_url,
            },
        };
        TreeEntry {
            name: item.name,
            path: item.path,
            listing_url: item.url,
            kind,
        }
    }
}

/// Where the walker gets listings and file contents from
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// URL of the repository's root listing
    fn root_listing_url(&self, repo: &RepoRef) -> String;

    /// Lists one directory
    async fn list_contents(&self, url: &str) -> Result<Vec<TreeEntry>, AnalyzeError>;

    /// Downloads one file as text
    async fn fetch_raw(&self, download_url: &str) -> Result<String, AnalyzeError>;
}

/// GitHub REST API client
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: String,
}

impl GitHubClient {
    /// Creates a client against `api_base` (normally "https://api.github.com")
    pub fn new(api_base: &str) -> Result<Self, AnalyzeError> {
        let http = Client::builder().user_agent(CLIENT_USER_AGENT).build()?;
        Ok(GitHubClient {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the repository README as raw text
    ///
    /// GitHub's /readme endpoint resolves README.md, readme.rst, etc.
    pub async fn fetch_readme(&self, repo: &RepoRef) -> Result<String, AnalyzeError> {
        let url = format!("{}/repos/{}/{}/readme", self.api_base, repo.owner, repo.name);
        let response = self.get(&url, RAW_MEDIA_TYPE).await?;
        Ok(response.text().await?)
    }

    // Issues one GET and turns a non-success status into AnalyzeError::Upstream
    async fn get(&self, url: &str, accept: &str) -> Result<Response, AnalyzeError> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The body explains *why* (e.g. "API rate limit exceeded"), keep it
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzeError::Upstream {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ContentSource for GitHubClient {
    fn root_listing_url(&self, repo: &RepoRef) -> String {
        format!("{}/repos/{}/{}/contents", self.api_base, repo.owner, repo.name)
    }

    async fn list_contents(&self, url: &str) -> Result<Vec<TreeEntry>, AnalyzeError> {
        let response = self.get(url, JSON_MEDIA_TYPE).await?;
        let items: Vec<ContentItem> = response.json().await?;
        Ok(items.into_iter().map(TreeEntry::from).collect())
    }

    async fn fetch_raw(&self, download_url: &str) -> Result<String, AnalyzeError> {
        // Same v3+json Accept as listings; only the README asks for .raw
        let response = self.get(download_url, JSON_MEDIA_TYPE).await?;
        let bytes = response.bytes().await?;

        String::from_utf8(bytes.to_vec()).map_err(|e| AnalyzeError::Decoding {
            url: download_url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_json_maps_to_entries() {
        let json = r#"[
            {"name": "src", "path": "src", "type": "dir",
             "url": "https://api.github.com/repos/a/b/contents/src?ref=main",
             "download_url": null, "sha": "abc", "size": 0},
            {"name": "README.md", "path": "README.md", "type": "file",
             "url": "https://api.github.com/repos/a/b/contents/README.md?ref=main",
             "download_url": "https://raw.githubusercontent.com/a/b/main/README.md"},
            {"name": "vendor", "path": "vendor", "type": "submodule",
             "url": "https://api.github.com/repos/a/b/contents/vendor?ref=main",
             "download_url": null}
        ]"#;

        let items: Vec<ContentItem> = serde_json::from_str(json).unwrap();
        let entries: Vec<TreeEntry> = items.into_iter().map(TreeEntry::from).collect();

        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(
            entries[0].listing_url,
            "https://api.github.com/repos/a/b/contents/src?ref=main"
        );
        assert_eq!(
            entries[1].kind,
            EntryKind::File {
                download_url: Some(
                    "https://raw.githubusercontent.com/a/b/main/README.md".to_string()
                )
            }
        );
        // Anything that isn't "dir" is treated as a file
        assert_eq!(entries[2].kind, EntryKind::File { download_url: None });
    }

    #[test]
    fn test_root_listing_url() {
        let client = GitHubClient::new("https://api.github.com/").unwrap();
        let repo = RepoRef::parse("octocat/Hello-World").unwrap();
        assert_eq!(
            client.root_listing_url(&repo),
            "https://api.github.com/repos/octocat/Hello-World/contents"
        );
    }
}
