//! The archive import pipeline.
//!
//! [`Importer::import`] takes one snapshot URL through validation, the
//! duplicate guard, fetching, extraction and persistence. Every attempt that
//! gets past the guard leaves exactly one import record behind, and that
//! record is in a terminal state by the time the call returns.

use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::archive::ArchiveHost;
use crate::article::{Article, ArticleStatus, NewArticle, PostType, SeoFields, SeoMetadata};
use crate::extract::{ExtractConfig, ScrapedArticle, extract_article};
use crate::fetch::SnapshotFetcher;
use crate::record::ArchiveImport;
use crate::revalidate::{NoopRevalidator, Revalidator, paths_for_article};
use crate::store::{ContentStore, StoreError};
use crate::{NewsroomError, Result};

pub const ALREADY_IMPORTED: &str = "This archive URL has already been imported";

/// Pipeline configuration.
#[derive(Debug, Clone, Default)]
pub struct ImportConfig {
    pub extract: ExtractConfig,
}

impl ImportConfig {
    pub fn builder() -> ImportConfigBuilder {
        ImportConfigBuilder::default()
    }

    /// `<origin>/<locale>/<slug>`
    pub fn canonical_url(&self, slug: &str) -> String {
        format!(
            "{}/{}/{}",
            self.extract.site_origin.as_str().trim_end_matches('/'),
            self.extract.locale,
            slug
        )
    }

    pub fn archive(&self) -> &ArchiveHost {
        &self.extract.archive
    }

    /// Host name of the site whose snapshots are imported.
    pub fn site_host(&self) -> &str {
        self.extract.site_origin.host_str().unwrap_or_default()
    }
}

/// Builder for [`ImportConfig`].
///
/// # Example
///
/// ```rust
/// use newsroom_core::ImportConfig;
///
/// let config = ImportConfig::builder()
///     .site_origin("https://ghanainsider.com")
///     .unwrap()
///     .locale("de")
///     .build();
/// assert_eq!(config.canonical_url("index.php/a"), "https://ghanainsider.com/de/index.php/a");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportConfigBuilder {
    config: ImportConfig,
}

impl ImportConfigBuilder {
    pub fn site_origin(mut self, origin: &str) -> Result<Self> {
        self.config.extract = ExtractConfig::builder()
            .site_origin(origin)?
            .locale(self.config.extract.locale.clone())
            .archive_host(self.config.extract.archive.clone())
            .build();
        Ok(self)
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.config.extract.locale = locale.into();
        self
    }

    pub fn archive_host(mut self, host: &str) -> Result<Self> {
        self.config.extract.archive = ArchiveHost::new(host)?;
        Ok(self)
    }

    pub fn extract(mut self, extract: ExtractConfig) -> Self {
        self.config.extract = extract;
        self
    }

    pub fn build(self) -> ImportConfig {
        self.config
    }
}

/// A completed import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSuccess {
    pub import_id: Uuid,
    pub post: Article,
    pub extracted: ScrapedArticle,
}

/// Runs archive imports against a store.
#[derive(Clone)]
pub struct Importer {
    store: Arc<dyn ContentStore>,
    fetcher: Arc<dyn SnapshotFetcher>,
    revalidator: Arc<dyn Revalidator>,
    config: ImportConfig,
}

impl Importer {
    pub fn new(store: Arc<dyn ContentStore>, fetcher: Arc<dyn SnapshotFetcher>) -> Self {
        Self { store, fetcher, revalidator: Arc::new(NoopRevalidator), config: ImportConfig::default() }
    }

    pub fn with_revalidator(mut self, revalidator: Arc<dyn Revalidator>) -> Self {
        self.revalidator = revalidator;
        self
    }

    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Imports one snapshot.
    ///
    /// Once the article is stored the import succeeds, even if its SEO row
    /// or the completed record cannot be written; both are logged.
    ///
    /// # Errors
    ///
    /// - [`NewsroomError::InvalidFormat`] before anything is stored or fetched
    /// - [`NewsroomError::Conflict`] when the URL or its slug is already live
    /// - [`NewsroomError::FetchFailed`], [`NewsroomError::NoContentFound`] or
    ///   [`NewsroomError::Persistence`] after the record has been marked failed
    pub async fn import(&self, snapshot_url: &str) -> Result<ImportSuccess> {
        let snapshot_url = snapshot_url.trim();
        let original_url = self.config.archive().original_url(snapshot_url)?;

        if let Some(prior) = self.store.latest_import_for(snapshot_url).await?
            && let Some(post_id) = prior.post_id
            && let Some(existing) = self.store.article_by_id(post_id).await?
        {
            tracing::info!(%snapshot_url, post_id = %existing.id, "snapshot already imported");
            return Err(NewsroomError::conflict(ALREADY_IMPORTED, existing.summary()));
        }

        let mut record = ArchiveImport::start(snapshot_url, original_url, OffsetDateTime::now_utc());
        self.store.insert_import(&record).await?;
        tracing::info!(import_id = %record.id, %snapshot_url, "import started");

        match self.run(&record, snapshot_url, original_url).await {
            Ok(success) => Ok(success),
            Err(err) => Err(self.mark_failed(&mut record, err).await),
        }
    }

    async fn run(&self, record: &ArchiveImport, snapshot_url: &str, original_url: &str) -> Result<ImportSuccess> {
        let html = self.fetcher.fetch(snapshot_url).await?;
        let extracted = extract_article(&html, original_url, &self.config.extract)?;

        if let Some(existing) = self.store.article_by_slug(&extracted.slug).await? {
            return Err(slug_conflict(&extracted.slug, existing));
        }

        let category_id = match self.store.category_by_slug(&extracted.category_slug).await {
            Ok(category) => category.map(|c| c.id),
            Err(e) => {
                tracing::warn!(error = %e, category = %extracted.category_slug, "category lookup failed");
                None
            }
        };

        let now = OffsetDateTime::now_utc();
        let post = Article::from_new(
            NewArticle {
                title: extracted.title.clone(),
                slug: extracted.slug.clone(),
                content: extracted.content.clone(),
                excerpt: Some(extracted.excerpt.clone()),
                featured_image: extracted.featured_image.clone(),
                category_id,
                status: ArticleStatus::Published,
                post_type: PostType::AiAssisted,
                original_source: Some(snapshot_url.to_string()),
                published_at: Some(now),
                ..Default::default()
            },
            now,
        );

        match self.store.insert_article(&post).await {
            Ok(()) => {}
            Err(StoreError::DuplicateSlug(slug)) => {
                let existing = self.store.article_by_slug(&slug).await?.ok_or_else(|| {
                    NewsroomError::Persistence(format!("slug {slug} was reported taken but no post holds it"))
                })?;
                return Err(slug_conflict(&slug, existing));
            }
            Err(e) => return Err(e.into()),
        }

        let meta = SeoMetadata::from_fields(
            post.id,
            SeoFields {
                meta_title: Some(extracted.meta_title.clone()),
                meta_description: Some(extracted.meta_description.clone()),
                keywords: extracted.keywords.clone(),
                schema_markup: None,
                canonical_url: Some(self.config.canonical_url(&post.slug)),
                og_image: post.featured_image.clone(),
            },
            now,
        );
        if let Err(e) = self.store.upsert_seo(&meta).await {
            tracing::warn!(error = %e, post_id = %post.id, "SEO metadata not saved, keeping article");
        }

        // The article is live from here on; a ledger write that fails now
        // must not turn the import into a failure.
        let mut completed = record.clone();
        match completed.complete(post.id) {
            Ok(()) => {
                if let Err(e) = self.store.update_import(&completed).await {
                    tracing::warn!(
                        error = %e, import_id = %record.id, post_id = %post.id,
                        "import record not completed"
                    );
                }
            }
            Err(e) => tracing::warn!(error = %e, import_id = %record.id, "import record already closed"),
        }

        tracing::info!(import_id = %record.id, post_id = %post.id, slug = %post.slug, "import completed");
        self.revalidator.invalidate(paths_for_article(&self.config.extract.locale, &post.slug));

        Ok(ImportSuccess { import_id: record.id, post, extracted })
    }

    async fn mark_failed(&self, record: &mut ArchiveImport, err: NewsroomError) -> NewsroomError {
        if let Err(e) = record.fail(err.to_string()) {
            tracing::error!(error = %e, "import record left in terminal state");
            return err;
        }
        if let Err(e) = self.store.update_import(record).await {
            tracing::error!(error = %e, import_id = %record.id, "could not mark import failed");
        }

        if err.is_conflict() {
            tracing::info!(import_id = %record.id, reason = %err, "import skipped");
        } else {
            tracing::warn!(import_id = %record.id, error = %err, "import failed");
        }
        err
    }
}

fn slug_conflict(slug: &str, existing: Article) -> NewsroomError {
    NewsroomError::conflict(format!("A post with the slug \"{slug}\" already exists"), existing.summary())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_url() {
        let config = ImportConfig::default();
        assert_eq!(config.canonical_url("index.php/a"), "https://ghanainsider.com/de/index.php/a");
        assert_eq!(config.site_host(), "ghanainsider.com");
    }

    #[test]
    fn test_builder_keeps_locale_when_origin_changes() {
        let config = ImportConfig::builder().locale("en").site_origin("https://example.org/").unwrap().build();
        assert_eq!(config.canonical_url("x"), "https://example.org/en/x");
    }

    #[test]
    fn test_builder_custom_archive_host() {
        let config = ImportConfig::builder().archive_host("archive.example.org").unwrap().build();
        assert_eq!(config.archive().host(), "archive.example.org");
    }
}
