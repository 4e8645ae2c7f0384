//! Sequential bulk import.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::NewsroomError;
use crate::import::Importer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Imported,
    Skipped,
    Failed,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Imported => "imported",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of importing one URL in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub url: String,
    pub status: OutcomeStatus,
    pub message: String,
    #[serde(default)]
    pub post_title: Option<String>,
    #[serde(default)]
    pub post_slug: Option<String>,
}

impl ImportOutcome {
    pub fn failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self { url: url.into(), status: OutcomeStatus::Failed, message: message.into(), post_title: None, post_slug: None }
    }
}

/// Something that imports a single URL and never fails outright.
///
/// The in-process [`Importer`] implements this; the CLI implements it over
/// HTTP against a running server.
#[async_trait]
pub trait ImportRunner: Send + Sync {
    async fn run_import(&self, url: &str) -> ImportOutcome;
}

#[async_trait]
impl ImportRunner for Importer {
    async fn run_import(&self, url: &str) -> ImportOutcome {
        match self.import(url).await {
            Ok(success) => ImportOutcome {
                url: url.to_string(),
                status: OutcomeStatus::Imported,
                message: format!("Imported: {}", success.post.title),
                post_title: Some(success.post.title),
                post_slug: Some(success.post.slug),
            },
            Err(NewsroomError::Conflict { message, existing }) => ImportOutcome {
                url: url.to_string(),
                status: OutcomeStatus::Skipped,
                message,
                post_title: Some(existing.title),
                post_slug: Some(existing.slug),
            },
            Err(e) => ImportOutcome::failed(url, e.to_string()),
        }
    }
}

/// Imports `urls` one at a time, yielding an outcome per URL in input order.
pub fn import_all<R>(runner: Arc<R>, urls: Vec<String>) -> impl Stream<Item = ImportOutcome> + Send
where
    R: ImportRunner + ?Sized + 'static,
{
    async_stream::stream! {
        for url in urls {
            let outcome = runner.run_import(&url).await;
            tracing::debug!(url = %outcome.url, status = %outcome.status, "bulk item done");
            yield outcome;
        }
    }
}

/// Picks the importable lines out of pasted text: trimmed, non-empty and
/// mentioning both the archive host and the site host.
pub fn filter_bulk_urls(text: &str, archive_host: &str, site_host: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.contains(archive_host) && line.contains(site_host))
        .map(str::to_string)
        .collect()
}
