//! Author bylines. Only one author may be the default.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use newsroom_core::{Author, AuthorPatch, NewAuthor};
use serde::Deserialize;
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{ok, present};
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

fn not_found() -> ApiError {
    ApiError::NotFound("Author not found".to_string())
}

fn parse_id(raw: Option<&str>) -> ApiResult<Uuid> {
    let raw = raw.ok_or_else(|| ApiError::BadRequest("Author ID is required".to_string()))?;
    raw.parse().map_err(|_| ApiError::BadRequest(format!("Invalid author ID: {raw}")))
}

pub async fn list_authors(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(ok(state.store.list_authors().await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateAuthorRequest {
    name: Option<String>,
    email: Option<String>,
    bio: Option<String>,
    avatar_url: Option<String>,
    is_default: Option<bool>,
}

pub async fn create_author(
    State(state): State<AppState>, ApiJson(body): ApiJson<CreateAuthorRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = present(&body.name).ok_or_else(|| ApiError::BadRequest("Name is required".to_string()))?;
    let author = Author::from_new(
        NewAuthor {
            name: name.to_string(),
            email: body.email,
            bio: body.bio,
            avatar_url: body.avatar_url,
            is_default: body.is_default.unwrap_or(false),
        },
        OffsetDateTime::now_utc(),
    );
    state.store.insert_author(&author).await?;
    tracing::info!(id = %author.id, is_default = author.is_default, "author created");
    Ok((StatusCode::CREATED, ok(author)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateAuthorRequest {
    id: Option<Uuid>,
    #[serde(flatten)]
    patch: AuthorPatch,
}

pub async fn update_author(
    State(state): State<AppState>, ApiJson(body): ApiJson<UpdateAuthorRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = body.id.ok_or_else(|| ApiError::BadRequest("Author ID is required".to_string()))?;
    if body.patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }
    let mut author = state.store.author_by_id(id).await?.ok_or_else(not_found)?;
    author.apply(body.patch, OffsetDateTime::now_utc());
    state.store.update_author(&author).await?;
    tracing::info!(%id, "author updated");
    Ok(ok(author))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    id: Option<String>,
}

/// The default author cannot be deleted; another one has to take over first.
pub async fn delete_author(
    State(state): State<AppState>, Query(params): Query<DeleteParams>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(present(&params.id))?;
    let author = state.store.author_by_id(id).await?.ok_or_else(not_found)?;
    if author.is_default {
        return Err(ApiError::BadRequest("Cannot delete default author".to_string()));
    }
    if !state.store.delete_author(id).await? {
        return Err(not_found());
    }
    tracing::info!(%id, "author deleted");
    Ok(Json(json!({ "success": true, "message": "Author deleted" })))
}
