//! Structured extraction of archived articles.
//!
//! [`extract_article`] turns one snapshot page into a [`ScrapedArticle`]:
//! title, cleaned body, excerpt, featured image, slug, inferred category and
//! keywords. It is a single deterministic pass with no network access; the
//! only failure is a page without a content container.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use time::OffsetDateTime;
use url::Url;

use crate::archive::ArchiveHost;
use crate::category::detect_category;
use crate::clean::{CleanConfig, clean_content};
use crate::parse::Document;
use crate::slug::slug_from_url;
use crate::{NewsroomError, Result};

static SENTENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").unwrap());

/// Words looked for in the article text when deriving keywords.
pub const TOPIC_KEYWORDS: &[&str] = &["tod", "hochzeit", "biografie", "karriere", "vermögen", "familie"];

pub const MAX_KEYWORDS: usize = 5;
pub const META_TITLE_CHARS: usize = 60;
pub const META_DESCRIPTION_CHARS: usize = 155;
const EXCERPT_CHARS: usize = 300;
const EXCERPT_FALLBACK_CHARS: usize = 200;
const EXCERPT_SENTENCES: usize = 3;

/// Selectors and site facts used during extraction.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Title candidates, highest priority first.
    pub title_selectors: Vec<String>,
    /// Theme-provided featured image, tried before the body and `og:image`.
    pub featured_image_selector: String,
    /// Main content container; pages without it are rejected.
    pub content_selector: String,
    pub clean: CleanConfig,
    /// Origin relative image URLs are resolved against.
    pub site_origin: Url,
    /// Locale path prefix slugs are taken after (`/de/`).
    pub locale: String,
    pub archive: ArchiveHost,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            title_selectors: ["h1.gb-headline.gb-headline-text", "h1.entry-title", "h1"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            featured_image_selector: "img.wp-post-image, img.attachment-post-thumbnail".to_string(),
            content_selector: "article .entry-content".to_string(),
            clean: CleanConfig::default(),
            site_origin: default_origin(),
            locale: "de".to_string(),
            archive: ArchiveHost::default(),
        }
    }
}

pub(crate) fn default_origin() -> Url {
    Url::parse("https://ghanainsider.com").unwrap_or_else(|_| unreachable!("static origin parses"))
}

impl ExtractConfig {
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::new()
    }
}

/// Builder for [`ExtractConfig`].
///
/// ```rust
/// use newsroom_core::ExtractConfig;
///
/// let config = ExtractConfig::builder()
///     .site_origin("https://example.org")
///     .unwrap()
///     .locale("en")
///     .build();
/// assert_eq!(config.locale, "en");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    pub fn new() -> Self {
        Self { config: ExtractConfig::default() }
    }

    pub fn title_selectors(mut self, selectors: Vec<String>) -> Self {
        self.config.title_selectors = selectors;
        self
    }

    pub fn content_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.content_selector = selector.into();
        self
    }

    /// Sets the site origin.
    ///
    /// # Errors
    ///
    /// Returns [`NewsroomError::InvalidUrl`] if `origin` is not an absolute URL.
    pub fn site_origin(mut self, origin: &str) -> Result<Self> {
        self.config.site_origin = Url::parse(origin).map_err(|e| NewsroomError::InvalidUrl(e.to_string()))?;
        Ok(self)
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.config.locale = locale.into();
        self
    }

    pub fn archive_host(mut self, host: ArchiveHost) -> Self {
        self.config.archive = host;
        self
    }

    pub fn remove_selectors(mut self, selectors: Vec<String>) -> Self {
        self.config.clean.remove_selectors = selectors;
        self
    }

    pub fn build(self) -> ExtractConfig {
        self.config
    }
}

/// An article recovered from a snapshot, not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapedArticle {
    pub title: String,
    /// Cleaned body markup.
    pub content: String,
    pub excerpt: String,
    pub slug: String,
    pub category_slug: String,
    pub featured_image: Option<String>,
    pub keywords: Vec<String>,
    pub meta_title: String,
    pub meta_description: String,
    /// Imports are published as new articles, so this is always empty.
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
}

/// Extracts an article from snapshot HTML.
///
/// `original_url` is the pre-archive URL; slug and category come from it.
///
/// # Errors
///
/// [`NewsroomError::NoContentFound`] when the page has no element matching
/// the content selector, [`NewsroomError::HtmlParseError`] for a bad selector.
pub fn extract_article(html: &str, original_url: &str, config: &ExtractConfig) -> Result<ScrapedArticle> {
    let doc = Document::parse(html);

    let title = doc
        .first_of(&config.title_selectors)?
        .map(|el| el.text().trim().to_string())
        .unwrap_or_default();

    let featured_image = featured_image(&doc, config)?;

    let container = doc.select_first(&config.content_selector)?.ok_or(NewsroomError::NoContentFound)?;
    let content = clean_content(&container.inner_html(), &config.clean, &config.archive)?;

    let text = Document::parse_fragment(&content).text_content();
    let excerpt = build_excerpt(&text);
    let slug = slug_from_url(original_url, &config.locale);
    let category_slug = detect_category(original_url, &text).to_string();
    let keywords = extract_keywords(&title, &text);

    tracing::debug!(%slug, %category_slug, keywords = keywords.len(), "extracted article");

    Ok(ScrapedArticle {
        meta_title: truncate_chars(&title, META_TITLE_CHARS),
        meta_description: truncate_chars(&excerpt, META_DESCRIPTION_CHARS),
        title,
        content,
        excerpt,
        slug,
        category_slug,
        featured_image,
        keywords,
        published_at: None,
    })
}

fn featured_image(doc: &Document, config: &ExtractConfig) -> Result<Option<String>> {
    let body_image = format!("{} img", config.content_selector);

    let candidates = [
        doc.select_first(&config.featured_image_selector)?.and_then(|el| el.attr("src").map(str::to_string)),
        doc.select_first(&body_image)?.and_then(|el| el.attr("src").map(str::to_string)),
        doc.meta_content("og:image"),
    ];

    Ok(candidates
        .into_iter()
        .flatten()
        .map(|src| src.trim().to_string())
        .find(|src| !src.is_empty())
        .map(|src| config.archive.clean_asset_url(&src, &config.site_origin)))
}

/// First three sentences, capped at 300 characters; falls back to the
/// first 200 characters of text when no sentence terminator is found.
pub fn build_excerpt(text: &str) -> String {
    let sentences: Vec<&str> = SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .take(EXCERPT_SENTENCES)
        .collect();

    let excerpt = truncate_chars(&sentences.join(" "), EXCERPT_CHARS).trim().to_string();
    if excerpt.is_empty() { truncate_chars(text, EXCERPT_FALLBACK_CHARS).trim().to_string() } else { excerpt }
}

/// Up to three long title words plus topic words found in the text.
pub fn extract_keywords(title: &str, text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = title
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 3)
        .take(3)
        .map(str::to_string)
        .collect();

    let text = text.to_lowercase();
    for keyword in TOPIC_KEYWORDS {
        if text.contains(keyword) && !keywords.iter().any(|k| k == keyword) {
            keywords.push(keyword.to_string());
        }
    }

    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// Truncates to at most `max` characters, never splitting a character.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((index, _)) => s[..index].to_string(),
        None => s.to_string(),
    }
}
