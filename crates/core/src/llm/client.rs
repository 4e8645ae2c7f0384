//! Language-model client port and the Anthropic Messages API implementation.

use async_trait::async_trait;

use crate::Result;

/// One single-turn completion.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the concatenated text blocks of the model's answer.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String>;
}

#[cfg(feature = "fetch")]
pub use anthropic::AnthropicClient;

#[cfg(feature = "fetch")]
mod anthropic {
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::Client;
    use serde::{Deserialize, Serialize};

    use super::{CompletionRequest, LlmClient};
    use crate::{NewsroomError, Result};

    const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
    const ANTHROPIC_VERSION: &str = "2023-06-01";

    pub struct AnthropicClient {
        client: Client,
        api_key: String,
        base_url: String,
    }

    #[derive(Serialize)]
    struct MessagesRequest<'a> {
        model: &'a str,
        max_tokens: u32,
        system: &'a str,
        messages: [Message<'a>; 1],
    }

    #[derive(Serialize)]
    struct Message<'a> {
        role: &'a str,
        content: &'a str,
    }

    #[derive(Debug, Deserialize)]
    struct MessagesResponse {
        #[serde(default)]
        content: Vec<ContentBlock>,
    }

    #[derive(Debug, Deserialize)]
    struct ContentBlock {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        text: String,
    }

    #[derive(Debug, Deserialize)]
    struct ErrorResponse {
        error: ErrorDetail,
    }

    #[derive(Debug, Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    impl AnthropicClient {
        pub fn new(api_key: impl Into<String>) -> Result<Self> {
            Self::with_base_url(api_key, ANTHROPIC_API_BASE)
        }

        /// Points the client at another host, e.g. a proxy or a test server.
        pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
            let client = Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .map_err(|e| NewsroomError::ConfigError(format!("HTTP client: {e}")))?;

            Ok(Self { client, api_key: api_key.into(), base_url: base_url.into().trim_end_matches('/').to_string() })
        }
    }

    #[async_trait]
    impl LlmClient for AnthropicClient {
        async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
            let body = MessagesRequest {
                model: request.model,
                max_tokens: request.max_tokens,
                system: request.system,
                messages: [Message { role: "user", content: request.prompt }],
            };

            tracing::debug!(model = request.model, prompt_chars = request.prompt.len(), "sending completion request");

            let response = self
                .client
                .post(format!("{}/v1/messages", self.base_url))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body)
                .send()
                .await
                .map_err(|e| NewsroomError::Llm(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ErrorResponse>(&text)
                    .map(|e| e.error.message)
                    .unwrap_or(text);
                return Err(NewsroomError::Llm(format!("{status}: {message}")));
            }

            let parsed: MessagesResponse = response.json().await.map_err(|e| NewsroomError::Llm(e.to_string()))?;

            Ok(parsed.content.into_iter().filter(|b| b.kind == "text").map(|b| b.text).collect())
        }
    }
}
