//! Directory-backed fetcher for sites checked out on disk.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use super::{FetchError, ResourceFetcher};

/// Reads resources relative to a site directory.
///
/// Missing files answer like a static file server would: `HttpStatus` 404.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a relative resource path under the site directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ResourceFetcher for FileFetcher {
    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let file = self.resolve(path);
        tracing::debug!("Reading {}", file.display());

        match tokio::fs::read(&file).await {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(FetchError::HttpStatus {
                path: path.to_string(),
                status: 404,
            }),
            Err(source) => Err(FetchError::Io {
                path: path.to_string(),
                source,
            }),
        }
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
