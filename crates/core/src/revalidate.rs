//! Cache invalidation for the public site.
//!
//! After an import publishes an article, the listing page, the article page
//! and the sitemap are stale. Invalidation is fire-and-forget: callers never
//! wait for it and failures are only logged.

/// Requests that cached public pages be rebuilt.
pub trait Revalidator: Send + Sync {
    fn invalidate(&self, paths: Vec<String>);
}

/// Does nothing. Used when no revalidation endpoint is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRevalidator;

impl Revalidator for NoopRevalidator {
    fn invalidate(&self, paths: Vec<String>) {
        tracing::debug!(?paths, "revalidation disabled");
    }
}

/// Public paths affected by publishing `slug` under `locale`.
pub fn paths_for_article(locale: &str, slug: &str) -> Vec<String> {
    vec![format!("/{locale}"), format!("/{locale}/{slug}"), "/sitemap.xml".to_string()]
}

#[cfg(feature = "fetch")]
pub use http::HttpRevalidator;

#[cfg(feature = "fetch")]
mod http {
    use std::time::Duration;

    use reqwest::Client;
    use serde::Serialize;

    use super::Revalidator;
    use crate::{NewsroomError, Result};

    /// Posts the paths to a revalidation webhook on a background task.
    #[derive(Debug, Clone)]
    pub struct HttpRevalidator {
        client: Client,
        endpoint: String,
        secret: Option<String>,
    }

    #[derive(Serialize)]
    struct RevalidateBody<'a> {
        paths: &'a [String],
    }

    impl HttpRevalidator {
        pub fn new(endpoint: impl Into<String>, secret: Option<String>) -> Result<Self> {
            let client = Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .map_err(|e| NewsroomError::ConfigError(format!("HTTP client: {e}")))?;
            Ok(Self { client, endpoint: endpoint.into(), secret })
        }
    }

    impl Revalidator for HttpRevalidator {
        fn invalidate(&self, paths: Vec<String>) {
            let Ok(handle) = tokio::runtime::Handle::try_current() else {
                tracing::warn!(?paths, "no async runtime, skipping revalidation");
                return;
            };

            let mut request = self.client.post(&self.endpoint);
            if let Some(secret) = &self.secret {
                request = request.header("x-revalidate-secret", secret);
            }

            handle.spawn(async move {
                match request.json(&RevalidateBody { paths: &paths }).send().await {
                    Ok(response) if response.status().is_success() => {
                        tracing::debug!(?paths, "revalidated");
                    }
                    Ok(response) => tracing::warn!(status = %response.status(), ?paths, "revalidation rejected"),
                    Err(e) => tracing::warn!(error = %e, ?paths, "revalidation failed"),
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_for_article() {
        assert_eq!(
            paths_for_article("de", "index.php/a"),
            ["/de", "/de/index.php/a", "/sitemap.xml"]
        );
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_http_revalidator_without_runtime_is_silent() {
        let revalidator = HttpRevalidator::new("http://127.0.0.1:9/revalidate", None).unwrap();
        revalidator.invalidate(vec!["/de".to_string()]);
    }
}
