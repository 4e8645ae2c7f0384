use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use newsroom_core::default_categories;
use serde_json::json;
use time::OffsetDateTime;

use super::ok;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(ok(state.store.list_categories().await?))
}

/// Inserts the built-in categories into an empty table.
pub async fn seed_categories(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let existing = state.store.list_categories().await?;
    if !existing.is_empty() {
        return Err(ApiError::AlreadySeeded(existing.into_iter().map(|c| c.slug).collect()));
    }

    let categories = default_categories(OffsetDateTime::now_utc().year());
    state.store.insert_categories(&categories).await?;
    tracing::info!(count = categories.len(), "seeded categories");

    Ok(Json(json!({
        "success": true,
        "message": format!("Successfully seeded {} categories", categories.len()),
        "data": categories,
    })))
}
