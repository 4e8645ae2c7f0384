//! Runs imports against a running newsroom server.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use newsroom_core::{ImportOutcome, ImportRunner, OutcomeStatus};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

pub struct RemoteImporter {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

#[derive(Deserialize, Default)]
struct ImportResponse {
    #[serde(default)]
    data: Option<ImportData>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    existing_post: Option<PostRef>,
}

#[derive(Deserialize)]
struct ImportData {
    post: PostRef,
}

#[derive(Deserialize)]
struct PostRef {
    title: String,
    slug: String,
}

impl RemoteImporter {
    pub fn new(server: &str, token: Option<String>, timeout: u64) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .context("Failed to build HTTP client")?;
        let endpoint = format!("{}/api/archive/import", server.trim_end_matches('/'));
        Ok(Self { client, endpoint, token })
    }

    async fn post(&self, url: &str) -> reqwest::Result<(StatusCode, ImportResponse)> {
        let mut request = self.client.post(&self.endpoint).json(&json!({ "archiveUrl": url }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.json::<ImportResponse>().await.unwrap_or_default();
        Ok((status, body))
    }
}

#[async_trait]
impl ImportRunner for RemoteImporter {
    async fn run_import(&self, url: &str) -> ImportOutcome {
        match self.post(url).await {
            Ok((status, body)) => outcome_from_response(url, status, body),
            Err(e) => ImportOutcome::failed(url, e.to_string()),
        }
    }
}

fn outcome_from_response(url: &str, status: StatusCode, body: ImportResponse) -> ImportOutcome {
    let (status, message, post) = if status.is_success() {
        let post = body.data.map(|d| d.post);
        let title = post.as_ref().map(|p| p.title.as_str()).unwrap_or_default();
        (OutcomeStatus::Imported, format!("Imported: {title}"), post)
    } else if status == StatusCode::CONFLICT {
        (OutcomeStatus::Skipped, body.message.unwrap_or_else(|| "Already exists".to_string()), body.existing_post)
    } else {
        (OutcomeStatus::Failed, body.error.unwrap_or_else(|| format!("Import failed ({status})")), None)
    };

    let (post_title, post_slug) = match post {
        Some(p) => (Some(p.title), Some(p.slug)),
        None => (None, None),
    };
    ImportOutcome { url: url.to_string(), status, message, post_title, post_slug }
}
