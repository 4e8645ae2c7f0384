//! Public, unauthenticated endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use newsroom_core::render_sitemap;
use serde_json::json;
use time::OffsetDateTime;

use crate::state::AppState;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Falls back to the static pages when the store cannot be read.
pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let articles = state.store.published_articles().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "sitemap rendered without articles");
        Vec::new()
    });

    let config = &state.importer.config().extract;
    let xml = render_sitemap(config.site_origin.as_str(), &config.locale, &articles, OffsetDateTime::now_utc());
    ([(header::CONTENT_TYPE, "application/xml")], xml)
}
