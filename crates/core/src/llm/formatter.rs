use std::sync::{Arc, LazyLock};

use regex::Regex;
use time::OffsetDateTime;

use super::client::{CompletionRequest, LlmClient};
use super::prompts::{SYSTEM_PROMPT, build_improve_prompt, build_prompt};
use crate::formatted::FormattedArticle;
use crate::slug::sanitize_slug;
use crate::{NewsroomError, Result};

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").unwrap());

pub const MAX_TOKENS: u32 = 4096;

/// Turns raw notes into structured German articles through a language model.
#[derive(Clone)]
pub struct Formatter {
    client: Arc<dyn LlmClient>,
    max_tokens: u32,
}

impl Formatter {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client, max_tokens: MAX_TOKENS }
    }

    /// Formats `raw_content` following the template of `category_slug`.
    ///
    /// # Errors
    ///
    /// [`NewsroomError::Llm`] when the model call fails and
    /// [`NewsroomError::InvalidResponse`] when its answer is not JSON.
    pub async fn format_content(&self, raw_content: &str, category_slug: &str, model: &str) -> Result<FormattedArticle> {
        let prompt = build_prompt(category_slug, raw_content, OffsetDateTime::now_utc().year());
        let request = CompletionRequest { model, system: SYSTEM_PROMPT, prompt: &prompt, max_tokens: self.max_tokens };

        let text = self.client.complete(request).await?;
        let article = parse_formatted(&text)?;

        tracing::info!(model, category = category_slug, slug = %article.slug, "formatted content");
        Ok(article)
    }

    /// Rewrites existing article HTML according to free-text instructions.
    pub async fn improve_content(&self, content: &str, instructions: &str, model: &str) -> Result<String> {
        let prompt = build_improve_prompt(content, instructions);
        let request = CompletionRequest { model, system: SYSTEM_PROMPT, prompt: &prompt, max_tokens: self.max_tokens };
        self.client.complete(request).await
    }
}

/// Parses a model answer, tolerating a surrounding ```json fence.
pub fn parse_formatted(text: &str) -> Result<FormattedArticle> {
    let json = strip_code_fence(text);
    let mut article: FormattedArticle =
        serde_json::from_str(json).map_err(|e| NewsroomError::InvalidResponse(e.to_string()))?;
    article.slug = sanitize_slug(&article.slug);
    Ok(article)
}

pub fn strip_code_fence(text: &str) -> &str {
    CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or_else(|| text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CannedClient {
        answer: String,
        seen: Mutex<Vec<(String, String, u32)>>,
    }

    impl CannedClient {
        fn new(answer: &str) -> Arc<Self> {
            Arc::new(Self { answer: answer.to_string(), seen: Mutex::new(Vec::new()) })
        }
    }

    #[async_trait]
    impl LlmClient for CannedClient {
        async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
            self.seen.lock().unwrap().push((request.model.to_string(), request.prompt.to_string(), request.max_tokens));
            Ok(self.answer.clone())
        }
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("Hier:\n```\n{}\n```\nFertig"), "{}");
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_sanitizes_slug() {
        let article = parse_formatted(r#"{"slug":"Müller Tod: Ursache 2025!"}"#).unwrap();
        assert_eq!(article.slug, "mueller-tod-ursache-2025");
    }

    #[test]
    fn test_parse_rejects_prose() {
        assert!(matches!(parse_formatted("Das kann ich nicht."), Err(NewsroomError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_format_content_sends_category_prompt() {
        let client = CannedClient::new("```json\n{\"title\":\"T\",\"keywords\":[\"a\"]}\n```");
        let formatter = Formatter::new(client.clone());

        let article = formatter.format_content("Notizen", "hochzeit", "claude-test").await.unwrap();
        assert_eq!(article.title, "T");
        assert_eq!(article.keywords, ["a"]);

        let seen = client.seen.lock().unwrap();
        let (model, prompt, max_tokens) = &seen[0];
        assert_eq!(model, "claude-test");
        assert!(prompt.contains("Promi-Hochzeitsnachrichten"));
        assert!(prompt.contains("Notizen"));
        assert_eq!(*max_tokens, MAX_TOKENS);
    }

    #[tokio::test]
    async fn test_improve_returns_text() {
        let formatter = Formatter::new(CannedClient::new("<p>Besser</p>"));
        let improved = formatter.improve_content("<p>Alt</p>", "besser", "m").await.unwrap();
        assert_eq!(improved, "<p>Besser</p>");
    }
}
