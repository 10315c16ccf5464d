//! Loading the site's JSON resources.
//!
//! Each fetch is single-shot: no retries, no timeout, no caching. Resources
//! are named by paths relative to a data source, which is either a base URL
//! (`HttpFetcher`) or a directory on disk (`FileFetcher`).

mod file;
mod http;

pub use file::FileFetcher;
pub use http::HttpFetcher;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

/// Errors that can occur while loading a resource.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to load {path}: HTTP {status}")]
    HttpStatus { path: String, status: u16 },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to load {path}: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid resource path {path}: {reason}")]
    InvalidPath { path: String, reason: String },
}

impl FetchError {
    /// The resource path the failure refers to.
    pub fn path(&self) -> &str {
        match self {
            Self::HttpStatus { path, .. }
            | Self::ParseError { path, .. }
            | Self::Transport { path, .. }
            | Self::Io { path, .. }
            | Self::InvalidPath { path, .. } => path,
        }
    }

    /// HTTP status for `HttpStatus` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A source of raw resource bodies addressed by relative path.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Read the body of the resource at `path`.
    ///
    /// A non-success answer from the source fails with `FetchError::HttpStatus`.
    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, FetchError>;

    /// Human-readable description of where resources come from.
    fn describe(&self) -> String;
}

/// Fetch a resource and parse it as untyped JSON.
pub async fn fetch_resource<F>(fetcher: &F, path: &str) -> Result<serde_json::Value, FetchError>
where
    F: ResourceFetcher + ?Sized,
{
    fetch_json(fetcher, path).await
}

/// Fetch a resource and deserialize it into `T`.
///
/// Malformed JSON and bodies that don't match `T` both fail with
/// `FetchError::ParseError`.
pub async fn fetch_json<T, F>(fetcher: &F, path: &str) -> Result<T, FetchError>
where
    T: DeserializeOwned,
    F: ResourceFetcher + ?Sized,
{
    let body = fetcher.fetch_bytes(path).await?;
    serde_json::from_slice(&body).map_err(|source| FetchError::ParseError {
        path: path.to_string(),
        source,
    })
}

/// Open a fetcher for a data source.
///
/// `http://` and `https://` sources are fetched over the network; anything
/// else is treated as a directory.
pub fn open_fetcher(source: &str, user_agent: &str) -> anyhow::Result<Box<dyn ResourceFetcher>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let base = Url::parse(source)
            .map_err(|e| anyhow::anyhow!("Invalid data URL {}: {}", source, e))?;
        Ok(Box::new(HttpFetcher::new(base, user_agent)?))
    } else {
        Ok(Box::new(FileFetcher::new(source)))
    }
}
