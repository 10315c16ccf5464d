//! Network fetcher backed by reqwest.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{FetchError, ResourceFetcher};

/// Fetches resources relative to a base URL.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    /// Create a fetcher for resources under `base`.
    ///
    /// A base without a trailing slash is treated as a directory, so
    /// `https://host/site` and `https://host/site/` resolve the same way.
    pub fn new(mut base: Url, user_agent: &str) -> Result<Self, reqwest::Error> {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, base })
    }

    /// Resolve a relative resource path against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| FetchError::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.resolve(path)?;
        tracing::debug!("GET {}", url);

        let transport = |source| FetchError::Transport {
            path: path.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}
