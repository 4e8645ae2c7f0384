//! Storage ports.
//!
//! The pipeline and the HTTP layer only talk to storage through these traits.
//! [`MemoryStore`] implements all of them in process; the server crate adds a
//! PostgreSQL adapter. Adapters must enforce slug uniqueness themselves and
//! report a violation as [`StoreError::DuplicateSlug`].

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::article::{Article, ArticleQuery, Page, SeoMetadata};
use crate::author::Author;
use crate::category::Category;
use crate::record::{ArchiveImport, ImportHistoryEntry, ImportQuery};
use crate::setting::Setting;

#[derive(Debug, Error)]
pub enum StoreError {
    /// An article with this slug already exists.
    #[error("duplicate slug: {0}")]
    DuplicateSlug(String),

    /// A category or setting with this key already exists.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Archive import records.
#[async_trait]
pub trait ImportLedger: Send + Sync {
    /// Most recent record for this exact snapshot URL, any status.
    async fn latest_import_for(&self, archive_url: &str) -> StoreResult<Option<ArchiveImport>>;

    async fn insert_import(&self, record: &ArchiveImport) -> StoreResult<()>;

    /// Persists a record after a lifecycle transition.
    async fn update_import(&self, record: &ArchiveImport) -> StoreResult<()>;

    async fn list_imports(&self, query: &ImportQuery) -> StoreResult<Vec<ImportHistoryEntry>>;
}

/// Articles and their SEO metadata.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn article_by_id(&self, id: Uuid) -> StoreResult<Option<Article>>;

    async fn article_by_slug(&self, slug: &str) -> StoreResult<Option<Article>>;

    async fn insert_article(&self, article: &Article) -> StoreResult<()>;

    async fn update_article(&self, article: &Article) -> StoreResult<()>;

    /// Returns whether a row was removed. Metadata goes with the article.
    async fn delete_article(&self, id: Uuid) -> StoreResult<bool>;

    async fn list_articles(&self, query: &ArticleQuery) -> StoreResult<Page<Article>>;

    /// All published articles, for the sitemap.
    async fn published_articles(&self) -> StoreResult<Vec<Article>>;

    async fn seo_for(&self, post_id: Uuid) -> StoreResult<Option<SeoMetadata>>;

    /// Inserts or replaces the metadata row of `meta.post_id`.
    async fn upsert_seo(&self, meta: &SeoMetadata) -> StoreResult<()>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Ordered by name.
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>>;

    async fn insert_categories(&self, categories: &[Category]) -> StoreResult<()>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Ordered by key.
    async fn list_settings(&self) -> StoreResult<Vec<Setting>>;

    async fn setting(&self, key: &str) -> StoreResult<Option<Setting>>;

    /// Returns the updated row, or `None` when the key does not exist.
    async fn update_setting(&self, key: &str, value: &str) -> StoreResult<Option<Setting>>;

    async fn insert_setting(&self, setting: &Setting) -> StoreResult<()>;
}

/// Authors. Writing a default author clears the flag on all others in the
/// same operation.
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// Ordered by name.
    async fn list_authors(&self) -> StoreResult<Vec<Author>>;

    async fn author_by_id(&self, id: Uuid) -> StoreResult<Option<Author>>;

    async fn insert_author(&self, author: &Author) -> StoreResult<()>;

    async fn update_author(&self, author: &Author) -> StoreResult<()>;

    async fn delete_author(&self, id: Uuid) -> StoreResult<bool>;
}

/// Everything the application needs from storage.
pub trait ContentStore: ImportLedger + ArticleStore + CategoryStore + SettingsStore + AuthorStore {}

impl<T> ContentStore for T where T: ImportLedger + ArticleStore + CategoryStore + SettingsStore + AuthorStore {}
