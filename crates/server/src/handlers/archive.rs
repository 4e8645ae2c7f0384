//! Archive import endpoints.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use newsroom_core::{ImportQuery, ImportStatus, import_all};
use serde::Deserialize;

use super::{ok, present};
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

const NDJSON: &str = "application/x-ndjson";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    #[serde(default)]
    archive_url: Option<String>,
}

pub async fn import_snapshot(
    State(state): State<AppState>, ApiJson(body): ApiJson<ImportRequest>,
) -> ApiResult<impl IntoResponse> {
    let Some(url) = present(&body.archive_url) else {
        return Err(ApiError::BadRequest("Archive URL is required".to_string()));
    };

    let imported = state.importer.import(url).await?;
    Ok(ok(imported))
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    status: Option<String>,
    limit: Option<usize>,
}

pub async fn import_history(
    State(state): State<AppState>, Query(params): Query<HistoryParams>,
) -> ApiResult<impl IntoResponse> {
    let mut query = ImportQuery::default();
    if let Some(status) = present(&params.status) {
        query.status = Some(status.parse::<ImportStatus>().map_err(ApiError::BadRequest)?);
    }
    if let Some(limit) = params.limit {
        query.limit = limit.clamp(1, 500);
    }

    let history = state.store.list_imports(&query).await?;
    Ok(ok(history))
}

#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    #[serde(default)]
    urls: Vec<String>,
}

/// Imports the URLs one after another, answering with one JSON line per URL
/// as soon as it is done.
pub async fn import_bulk(State(state): State<AppState>, ApiJson(body): ApiJson<BulkRequest>) -> ApiResult<Response> {
    let urls: Vec<String> =
        body.urls.iter().map(|u| u.trim()).filter(|u| !u.is_empty()).map(str::to_string).collect();
    if urls.is_empty() {
        return Err(ApiError::BadRequest("No URLs provided".to_string()));
    }
    tracing::info!(count = urls.len(), "bulk import started");

    let lines = import_all(state.importer.clone(), urls).map(|outcome| {
        serde_json::to_string(&outcome).map(|mut line| {
            line.push('\n');
            line
        })
    });

    Ok(([(header::CONTENT_TYPE, NDJSON)], Body::from_stream(lines)).into_response())
}
