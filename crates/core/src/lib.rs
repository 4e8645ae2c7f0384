pub mod archive;
pub mod article;
pub mod author;
pub mod bulk;
pub mod category;
pub mod clean;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatted;
pub mod import;
pub mod llm;
pub mod parse;
pub mod record;
pub mod revalidate;
pub mod scoring;
pub mod setting;
pub mod sitemap;
pub mod slug;
pub mod store;

pub use archive::{ArchiveHost, DEFAULT_ARCHIVE_HOST};
pub use article::{
    Article, ArticlePatch, ArticleQuery, ArticleStatus, ArticleSummary, NewArticle, Page, PostType, SeoFields,
    SeoMetadata,
};
pub use author::{Author, AuthorPatch, NewAuthor};
pub use bulk::{ImportOutcome, ImportRunner, OutcomeStatus, filter_bulk_urls, import_all};
pub use category::{Category, default_categories, detect_category};
pub use clean::{CleanConfig, clean_content};
pub use error::{NewsroomError, Result};
pub use extract::{ExtractConfig, ExtractConfigBuilder, ScrapedArticle, extract_article};
#[cfg(feature = "fetch")]
pub use fetch::HttpFetcher;
pub use fetch::{FetchConfig, SnapshotFetcher};
pub use formatted::FormattedArticle;
pub use import::{ImportConfig, ImportConfigBuilder, ImportSuccess, Importer};
pub use parse::Document;
pub use record::{ArchiveImport, ImportHistoryEntry, ImportQuery, ImportStatus};
#[cfg(feature = "fetch")]
pub use revalidate::HttpRevalidator;
pub use revalidate::{NoopRevalidator, Revalidator};
pub use scoring::{SeoCheck, SeoReport, score_article};
pub use setting::Setting;
pub use sitemap::render_sitemap;
pub use slug::{sanitize_slug, slug_from_url};
pub use store::{ContentStore, MemoryStore, StoreError, StoreResult};
