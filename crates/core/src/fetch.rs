//! Snapshot retrieval.
//!
//! The importer only sees the [`SnapshotFetcher`] trait. [`HttpFetcher`] is the
//! network implementation (behind the `fetch` feature); tests and offline
//! tools provide their own.

use async_trait::async_trait;

use crate::Result;

/// HTTP client configuration for fetching snapshots.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: format!("Mozilla/5.0 (compatible; Newsroom/{})", env!("CARGO_PKG_VERSION")) }
    }
}

/// Retrieves the raw HTML of a snapshot URL.
#[async_trait]
pub trait SnapshotFetcher: Send + Sync {
    /// # Errors
    ///
    /// [`NewsroomError::FetchFailed`](crate::NewsroomError::FetchFailed) for
    /// non-success statuses, transport failures and timeouts.
    async fn fetch(&self, url: &str) -> Result<String>;
}

#[cfg(feature = "fetch")]
pub use http::HttpFetcher;

#[cfg(feature = "fetch")]
mod http {
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::Client;

    use super::{FetchConfig, SnapshotFetcher};
    use crate::{NewsroomError, Result};

    /// Fetches snapshots over HTTP with one shared connection pool.
    #[derive(Debug, Clone)]
    pub struct HttpFetcher {
        client: Client,
        timeout: u64,
    }

    impl HttpFetcher {
        pub fn new(config: &FetchConfig) -> Result<Self> {
            let client = Client::builder()
                .timeout(Duration::from_secs(config.timeout))
                .user_agent(config.user_agent.clone())
                .build()
                .map_err(|e| NewsroomError::ConfigError(format!("HTTP client: {e}")))?;
            Ok(Self { client, timeout: config.timeout })
        }
    }

    #[async_trait]
    impl SnapshotFetcher for HttpFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            let response = self
                .client
                .get(url)
                .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
                .header("Accept-Language", "de-DE,de;q=0.9,en;q=0.8")
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(NewsroomError::FetchFailed(format!("Failed to fetch archive: {}", status)));
            }

            response.text().await.map_err(|e| self.transport_error(e))
        }
    }

    impl HttpFetcher {
        fn transport_error(&self, e: reqwest::Error) -> NewsroomError {
            if e.is_timeout() {
                NewsroomError::FetchFailed(format!("Failed to fetch archive: timed out after {}s", self.timeout))
            } else {
                NewsroomError::FetchFailed(format!("Failed to fetch archive: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("Newsroom"));
    }

    #[cfg(feature = "fetch")]
    #[tokio::test]
    async fn test_unreachable_host_is_fetch_failed() {
        let fetcher = HttpFetcher::new(&FetchConfig { timeout: 2, ..Default::default() }).unwrap();
        let result = fetcher.fetch("http://127.0.0.1:9/web/1/https://ghanainsider.com/de/a/").await;
        match result {
            Err(crate::NewsroomError::FetchFailed(message)) => assert!(message.starts_with("Failed to fetch archive")),
            other => panic!("expected FetchFailed, got {other:?}"),
        }
    }
}
