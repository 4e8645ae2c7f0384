use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{ArticleStore, AuthorStore, CategoryStore, ImportLedger, SettingsStore, StoreError, StoreResult};
use crate::article::{Article, ArticleQuery, Page, SeoMetadata};
use crate::author::Author;
use crate::category::Category;
use crate::record::{ArchiveImport, ImportHistoryEntry, ImportQuery, LinkedPost};
use crate::setting::Setting;

#[derive(Default)]
struct Tables {
    imports: Vec<ArchiveImport>,
    articles: Vec<Article>,
    seo: HashMap<Uuid, SeoMetadata>,
    categories: Vec<Category>,
    settings: BTreeMap<String, Setting>,
    authors: Vec<Author>,
}

impl Tables {
    fn clear_default_except(&mut self, id: Uuid) {
        for author in self.authors.iter_mut().filter(|a| a.id != id) {
            author.is_default = false;
        }
    }
}

/// In-process store used by tests, the CLI and the server when no database is configured.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        let store = Self::default();
        if let Ok(mut tables) = store.tables.lock() {
            tables.categories = categories;
        }
        store
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ImportLedger for MemoryStore {
    async fn latest_import_for(&self, archive_url: &str) -> StoreResult<Option<ArchiveImport>> {
        let tables = self.lock()?;
        Ok(tables.imports.iter().rev().find(|r| r.archive_url == archive_url).cloned())
    }

    async fn insert_import(&self, record: &ArchiveImport) -> StoreResult<()> {
        self.lock()?.imports.push(record.clone());
        Ok(())
    }

    async fn update_import(&self, record: &ArchiveImport) -> StoreResult<()> {
        let mut tables = self.lock()?;
        let row = tables
            .imports
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| StoreError::NotFound(format!("import {}", record.id)))?;
        *row = record.clone();
        Ok(())
    }

    async fn list_imports(&self, query: &ImportQuery) -> StoreResult<Vec<ImportHistoryEntry>> {
        let tables = self.lock()?;
        let entries = tables
            .imports
            .iter()
            .rev()
            .filter(|r| query.status.is_none_or(|s| r.status == s))
            .take(query.limit)
            .map(|r| {
                let post = r
                    .post_id
                    .and_then(|id| tables.articles.iter().find(|a| a.id == id))
                    .map(|a| LinkedPost { title: a.title.clone(), slug: a.slug.clone(), status: a.status });
                ImportHistoryEntry { import: r.clone(), post }
            })
            .collect();
        Ok(entries)
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn article_by_id(&self, id: Uuid) -> StoreResult<Option<Article>> {
        Ok(self.lock()?.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn article_by_slug(&self, slug: &str) -> StoreResult<Option<Article>> {
        Ok(self.lock()?.articles.iter().find(|a| a.slug == slug).cloned())
    }

    async fn insert_article(&self, article: &Article) -> StoreResult<()> {
        let mut tables = self.lock()?;
        if tables.articles.iter().any(|a| a.slug == article.slug) {
            return Err(StoreError::DuplicateSlug(article.slug.clone()));
        }
        tables.articles.push(article.clone());
        Ok(())
    }

    async fn update_article(&self, article: &Article) -> StoreResult<()> {
        let mut tables = self.lock()?;
        if tables.articles.iter().any(|a| a.slug == article.slug && a.id != article.id) {
            return Err(StoreError::DuplicateSlug(article.slug.clone()));
        }
        let row = tables
            .articles
            .iter_mut()
            .find(|a| a.id == article.id)
            .ok_or_else(|| StoreError::NotFound(format!("post {}", article.id)))?;
        *row = article.clone();
        Ok(())
    }

    async fn delete_article(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.lock()?;
        let before = tables.articles.len();
        tables.articles.retain(|a| a.id != id);
        tables.seo.remove(&id);
        Ok(tables.articles.len() != before)
    }

    async fn list_articles(&self, query: &ArticleQuery) -> StoreResult<Page<Article>> {
        let tables = self.lock()?;
        let mut matching: Vec<&Article> = tables
            .articles
            .iter()
            .rev()
            .filter(|a| query.status.is_none_or(|s| a.status == s))
            .filter(|a| query.category_id.is_none_or(|c| a.category_id == Some(c)))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let items = matching.into_iter().skip(query.offset).take(query.limit).cloned().collect();
        Ok(Page { items, total })
    }

    async fn published_articles(&self) -> StoreResult<Vec<Article>> {
        let tables = self.lock()?;
        Ok(tables
            .articles
            .iter()
            .filter(|a| a.status == crate::article::ArticleStatus::Published)
            .cloned()
            .collect())
    }

    async fn seo_for(&self, post_id: Uuid) -> StoreResult<Option<SeoMetadata>> {
        Ok(self.lock()?.seo.get(&post_id).cloned())
    }

    async fn upsert_seo(&self, meta: &SeoMetadata) -> StoreResult<()> {
        let mut tables = self.lock()?;
        if !tables.articles.iter().any(|a| a.id == meta.post_id) {
            return Err(StoreError::NotFound(format!("post {}", meta.post_id)));
        }
        tables.seo.insert(meta.post_id, meta.clone());
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut categories = self.lock()?.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        Ok(self.lock()?.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn insert_categories(&self, categories: &[Category]) -> StoreResult<()> {
        let mut tables = self.lock()?;
        if let Some(dup) = categories.iter().find(|c| tables.categories.iter().any(|e| e.slug == c.slug)) {
            return Err(StoreError::DuplicateKey(dup.slug.clone()));
        }
        tables.categories.extend_from_slice(categories);
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn list_settings(&self) -> StoreResult<Vec<Setting>> {
        Ok(self.lock()?.settings.values().cloned().collect())
    }

    async fn setting(&self, key: &str) -> StoreResult<Option<Setting>> {
        Ok(self.lock()?.settings.get(key).cloned())
    }

    async fn update_setting(&self, key: &str, value: &str) -> StoreResult<Option<Setting>> {
        let mut tables = self.lock()?;
        Ok(tables.settings.get_mut(key).map(|setting| {
            setting.value = value.to_string();
            setting.updated_at = OffsetDateTime::now_utc();
            setting.clone()
        }))
    }

    async fn insert_setting(&self, setting: &Setting) -> StoreResult<()> {
        let mut tables = self.lock()?;
        if tables.settings.contains_key(&setting.key) {
            return Err(StoreError::DuplicateKey(setting.key.clone()));
        }
        tables.settings.insert(setting.key.clone(), setting.clone());
        Ok(())
    }
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn list_authors(&self) -> StoreResult<Vec<Author>> {
        let mut authors = self.lock()?.authors.clone();
        authors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(authors)
    }

    async fn author_by_id(&self, id: Uuid) -> StoreResult<Option<Author>> {
        Ok(self.lock()?.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_author(&self, author: &Author) -> StoreResult<()> {
        let mut tables = self.lock()?;
        if author.is_default {
            tables.clear_default_except(author.id);
        }
        tables.authors.push(author.clone());
        Ok(())
    }

    async fn update_author(&self, author: &Author) -> StoreResult<()> {
        let mut tables = self.lock()?;
        if !tables.authors.iter().any(|a| a.id == author.id) {
            return Err(StoreError::NotFound(format!("author {}", author.id)));
        }
        if author.is_default {
            tables.clear_default_except(author.id);
        }
        if let Some(row) = tables.authors.iter_mut().find(|a| a.id == author.id) {
            *row = author.clone();
        }
        Ok(())
    }

    async fn delete_author(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.lock()?;
        let before = tables.authors.len();
        tables.authors.retain(|a| a.id != id);
        Ok(tables.authors.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{ArticleStatus, NewArticle, SeoFields};
    use crate::author::NewAuthor;
    use crate::category::default_categories;
    use crate::record::ImportStatus;

    fn article(slug: &str, status: ArticleStatus) -> Article {
        Article::from_new(
            NewArticle {
                title: slug.to_uppercase(),
                slug: slug.to_string(),
                content: "<p>x</p>".to_string(),
                status,
                ..Default::default()
            },
            OffsetDateTime::now_utc(),
        )
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let store = MemoryStore::new();
        store.insert_article(&article("a", ArticleStatus::Draft)).await.unwrap();

        let err = store.insert_article(&article("a", ArticleStatus::Draft)).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSlug(slug) if slug == "a"));
    }

    #[tokio::test]
    async fn test_update_into_taken_slug_rejected() {
        let store = MemoryStore::new();
        store.insert_article(&article("a", ArticleStatus::Draft)).await.unwrap();
        let mut b = article("b", ArticleStatus::Draft);
        store.insert_article(&b).await.unwrap();

        b.slug = "a".to_string();
        assert!(matches!(store.update_article(&b).await, Err(StoreError::DuplicateSlug(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_metadata() {
        let store = MemoryStore::new();
        let a = article("a", ArticleStatus::Published);
        store.insert_article(&a).await.unwrap();
        let meta = SeoMetadata::from_fields(a.id, SeoFields::default(), OffsetDateTime::now_utc());
        store.upsert_seo(&meta).await.unwrap();

        assert!(store.delete_article(a.id).await.unwrap());
        assert!(store.seo_for(a.id).await.unwrap().is_none());
        assert!(!store.delete_article(a.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_keeps_import_link() {
        let store = MemoryStore::new();
        let a = article("a", ArticleStatus::Published);
        store.insert_article(&a).await.unwrap();
        let url = "https://web.archive.org/web/1/https://ghanainsider.com/de/a/";
        let mut record = ArchiveImport::start(url, "https://ghanainsider.com/de/a/", OffsetDateTime::now_utc());
        store.insert_import(&record).await.unwrap();
        record.complete(a.id).unwrap();
        store.update_import(&record).await.unwrap();

        assert!(store.delete_article(a.id).await.unwrap());

        let latest = store.latest_import_for(url).await.unwrap().unwrap();
        assert_eq!(latest.status, ImportStatus::Completed);
        assert_eq!(latest.post_id, Some(a.id));
        let history = store.list_imports(&ImportQuery::default()).await.unwrap();
        assert!(history[0].post.is_none());
    }

    #[tokio::test]
    async fn test_list_filters_and_counts() {
        let store = MemoryStore::new();
        for slug in ["a", "b", "c"] {
            store.insert_article(&article(slug, ArticleStatus::Published)).await.unwrap();
        }
        store.insert_article(&article("d", ArticleStatus::Draft)).await.unwrap();

        let query = ArticleQuery { status: Some(ArticleStatus::Published), limit: 2, ..Default::default() };
        let page = store.list_articles(&query).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(store.published_articles().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_latest_import_and_history_join() {
        let store = MemoryStore::new();
        let url = "https://web.archive.org/web/1/https://ghanainsider.com/de/a/";
        let mut first = ArchiveImport::start(url, "https://ghanainsider.com/de/a/", OffsetDateTime::now_utc());
        first.fail("boom").unwrap();
        store.insert_import(&first).await.unwrap();

        let a = article("a", ArticleStatus::Published);
        store.insert_article(&a).await.unwrap();
        let mut second = ArchiveImport::start(url, "https://ghanainsider.com/de/a/", OffsetDateTime::now_utc());
        store.insert_import(&second).await.unwrap();
        second.complete(a.id).unwrap();
        store.update_import(&second).await.unwrap();

        let latest = store.latest_import_for(url).await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);

        let history = store.list_imports(&ImportQuery::default()).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].post.as_ref().map(|p| p.slug.as_str()), Some("a"));
        assert!(history[1].post.is_none());

        let failed = ImportQuery { status: Some(ImportStatus::Failed), ..Default::default() };
        assert_eq!(store.list_imports(&failed).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_settings_update_requires_existing_key() {
        let store = MemoryStore::new();
        assert!(store.update_setting("ai_model", "x").await.unwrap().is_none());

        store.insert_setting(&Setting::new("ai_model", "claude-3-5-haiku-20241022", None)).await.unwrap();
        let updated = store.update_setting("ai_model", "claude-sonnet-4-20250514").await.unwrap().unwrap();
        assert_eq!(updated.value, "claude-sonnet-4-20250514");
        assert!(matches!(
            store.insert_setting(&Setting::new("ai_model", "y", None)).await,
            Err(StoreError::DuplicateKey(_))
        ));
    }

    #[tokio::test]
    async fn test_single_default_author() {
        let store = MemoryStore::new();
        let now = OffsetDateTime::now_utc();
        let zoe = Author::from_new(NewAuthor { name: "Zoe".into(), is_default: true, ..Default::default() }, now);
        let ama = Author::from_new(NewAuthor { name: "Ama".into(), is_default: true, ..Default::default() }, now);
        store.insert_author(&zoe).await.unwrap();
        store.insert_author(&ama).await.unwrap();

        let authors = store.list_authors().await.unwrap();
        let flags: Vec<_> = authors.iter().map(|a| (a.name.as_str(), a.is_default)).collect();
        assert_eq!(flags, [("Ama", true), ("Zoe", false)]);

        let mut zoe = store.author_by_id(zoe.id).await.unwrap().unwrap();
        zoe.is_default = true;
        store.update_author(&zoe).await.unwrap();
        assert!(!store.author_by_id(ama.id).await.unwrap().unwrap().is_default);

        assert!(store.delete_author(ama.id).await.unwrap());
        assert!(matches!(store.update_author(&ama).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_categories_sorted_by_name() {
        let store = MemoryStore::with_categories(default_categories(2025));
        let names: Vec<_> = store.list_categories().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Breaking News", "Gastbeitrag", "Hochzeit", "Tod/Nachruf"]);
        assert!(store.category_by_slug("tod").await.unwrap().is_some());
    }
}
