//! Articles, their SEO metadata and the publish-state rules.
//!
//! [`Article`] is the canonical content unit. New rows are described by
//! [`NewArticle`] and edits by [`ArticlePatch`]; both go through this module so
//! the `published_at` policy lives in exactly one place: it is stamped the
//! first time an article becomes published and never cleared afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Editorial state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Draft => "draft",
            ArticleStatus::Published => "published",
            ArticleStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("Invalid article status: {}", s)),
        }
    }
}

/// How an article came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    /// Formatted by the language model or recovered from the archive.
    #[default]
    AiAssisted,
    GuestPost,
    Manual,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::AiAssisted => "ai_assisted",
            PostType::GuestPost => "guest_post",
            PostType::Manual => "manual",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai_assisted" => Ok(Self::AiAssisted),
            "guest_post" => Ok(Self::GuestPost),
            "manual" => Ok(Self::Manual),
            _ => Err(format!("Invalid post type: {}", s)),
        }
    }
}

/// A stored article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    /// Natural key; unique across all articles.
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub category_id: Option<Uuid>,
    pub status: ArticleStatus,
    pub post_type: PostType,
    /// 0-100, only meaningful for scored drafts.
    pub seo_score: i32,
    pub view_count: i64,
    pub is_featured: bool,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub original_source: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Article {
    /// Materializes a new article, assigning its id and timestamps.
    ///
    /// An explicit `published_at` wins; otherwise an article created as
    /// published is stamped with `now`.
    pub fn from_new(new: NewArticle, now: OffsetDateTime) -> Self {
        let published_at = new
            .published_at
            .or_else(|| (new.status == ArticleStatus::Published).then_some(now));

        Self {
            id: Uuid::new_v4(),
            title: new.title,
            slug: new.slug,
            content: new.content,
            excerpt: new.excerpt,
            featured_image: new.featured_image,
            category_id: new.category_id,
            status: new.status,
            post_type: new.post_type,
            seo_score: new.seo_score.clamp(0, 100),
            view_count: 0,
            is_featured: false,
            author_name: new.author_name,
            author_email: new.author_email,
            original_source: new.original_source,
            published_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies an edit in place.
    ///
    /// Moving to `published` stamps `published_at` only if it was never set;
    /// moving back to draft or archived leaves it untouched.
    pub fn apply(&mut self, patch: ArticlePatch, now: OffsetDateTime) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(slug) = patch.slug {
            self.slug = slug;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(featured_image) = patch.featured_image {
            self.featured_image = featured_image;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(post_type) = patch.post_type {
            self.post_type = post_type;
        }
        if let Some(seo_score) = patch.seo_score {
            self.seo_score = seo_score.clamp(0, 100);
        }
        if let Some(is_featured) = patch.is_featured {
            self.is_featured = is_featured;
        }
        if let Some(author_name) = patch.author_name {
            self.author_name = author_name;
        }
        if let Some(author_email) = patch.author_email {
            self.author_email = author_email;
        }
        if let Some(status) = patch.status {
            if status == ArticleStatus::Published && self.published_at.is_none() {
                self.published_at = Some(now);
            }
            self.status = status;
        }
        self.updated_at = now;
    }

    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary { id: self.id, title: self.title.clone(), slug: self.slug.clone(), status: self.status }
    }
}

/// The identifying fields of an article, as shown in conflict responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub status: ArticleStatus,
}

/// Input for creating an article.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub status: ArticleStatus,
    #[serde(default)]
    pub post_type: PostType,
    #[serde(default)]
    pub seo_score: i32,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub original_source: Option<String>,
    #[serde(skip)]
    pub published_at: Option<OffsetDateTime>,
}

/// A partial edit. Absent fields are left unchanged.
///
/// The nullable columns take `Some(None)` to clear them, which is what an
/// explicit JSON `null` deserializes to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub excerpt: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub featured_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub category_id: Option<Option<Uuid>>,
    pub status: Option<ArticleStatus>,
    pub post_type: Option<PostType>,
    pub seo_score: Option<i32>,
    pub is_featured: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub author_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub author_email: Option<Option<String>>,
}

/// Present-but-null becomes `Some(None)`; `#[serde(default)]` covers absent.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Listing filter for articles; newest first.
#[derive(Debug, Clone)]
pub struct ArticleQuery {
    pub status: Option<ArticleStatus>,
    pub category_id: Option<Uuid>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self { status: None, category_id: None, limit: 20, offset: 0 }
    }
}

/// One page of a listing plus the unpaginated total.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Search-engine metadata stored next to an article (1:1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoMetadata {
    pub id: Uuid,
    pub post_id: Uuid,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub keywords: Vec<String>,
    pub schema_markup: Option<serde_json::Value>,
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// SEO fields supplied by an editor or derived by the importer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoFields {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub schema_markup: Option<serde_json::Value>,
    #[serde(default)]
    pub canonical_url: Option<String>,
    #[serde(default)]
    pub og_image: Option<String>,
}

impl SeoMetadata {
    pub fn from_fields(post_id: Uuid, fields: SeoFields, now: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            meta_title: fields.meta_title,
            meta_description: fields.meta_description,
            keywords: fields.keywords,
            schema_markup: fields.schema_markup,
            canonical_url: fields.canonical_url,
            og_image: fields.og_image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the stored fields, keeping identity and creation time.
    pub fn merge(&mut self, fields: SeoFields, now: OffsetDateTime) {
        self.meta_title = fields.meta_title.or(self.meta_title.take());
        self.meta_description = fields.meta_description.or(self.meta_description.take());
        if !fields.keywords.is_empty() {
            self.keywords = fields.keywords;
        }
        self.schema_markup = fields.schema_markup.or(self.schema_markup.take());
        self.canonical_url = fields.canonical_url.or(self.canonical_url.take());
        self.og_image = fields.og_image.or(self.og_image.take());
        self.updated_at = now;
    }
}
