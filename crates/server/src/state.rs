use std::sync::Arc;

use newsroom_core::llm::{AnthropicClient, EnvSource, Formatter, ProcessEnv};
use newsroom_core::{FetchConfig, HttpFetcher, HttpRevalidator, ImportConfig, Importer, MemoryStore};
use newsroom_core::store::ContentStore;

use crate::config::ServerConfig;
use crate::pg::PgStore;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub importer: Arc<Importer>,
    /// `None` when no language-model key is configured.
    pub formatter: Option<Arc<Formatter>>,
    pub env: Arc<dyn EnvSource>,
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, importer: Importer) -> Self {
        Self { store, importer: Arc::new(importer), formatter: None, env: Arc::new(ProcessEnv), admin_token: None }
    }

    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    pub fn with_env(mut self, env: Arc<dyn EnvSource>) -> Self {
        self.env = env;
        self
    }

    pub fn with_admin_token(mut self, token: impl Into<Arc<str>>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    pub async fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn ContentStore> = match &config.database_url {
            Some(url) => Arc::new(PgStore::connect(url, config.pool_size).await?),
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory storage; data is lost on restart");
                Arc::new(MemoryStore::new())
            }
        };

        let import_config = ImportConfig::builder()
            .site_origin(&config.site_origin)?
            .archive_host(&config.archive_host)?
            .build();
        let fetcher = HttpFetcher::new(&FetchConfig { timeout: config.fetch_timeout, ..Default::default() })?;

        let mut importer = Importer::new(store.clone(), Arc::new(fetcher)).with_config(import_config);
        if let Some(url) = &config.revalidate_url {
            importer = importer.with_revalidator(Arc::new(HttpRevalidator::new(url, config.revalidate_secret.clone())?));
            tracing::info!(endpoint = %url, "revalidation enabled");
        }

        let mut state = Self::new(store, importer);
        match &config.anthropic_api_key {
            Some(key) => state = state.with_formatter(Formatter::new(Arc::new(AnthropicClient::new(key.clone())?))),
            None => tracing::warn!("ANTHROPIC_API_KEY not set, AI formatting is disabled"),
        }
        if let Some(token) = &config.admin_token {
            state = state.with_admin_token(token.as_str());
        } else {
            tracing::warn!("ADMIN_TOKEN not set, admin routes are unauthenticated");
        }
        Ok(state)
    }
}
