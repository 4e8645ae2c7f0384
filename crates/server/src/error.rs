//! Maps domain failures onto HTTP responses.

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use newsroom_core::NewsroomError;
use newsroom_core::store::StoreError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    /// Categories were already seeded; carries the existing slugs.
    AlreadySeeded(Vec<String>),
    Core(NewsroomError),
    Store(StoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<NewsroomError> for ApiError {
    fn from(err: NewsroomError) -> Self {
        ApiError::Core(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => error_body(StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => error_body(StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => error_body(StatusCode::CONFLICT, msg),
            ApiError::AlreadySeeded(existing) => (
                StatusCode::CONFLICT,
                Json(json!({
                    "success": false,
                    "error": "Categories already exist. Delete existing categories first if you want to re-seed.",
                    "existing": existing,
                })),
            )
                .into_response(),
            ApiError::Core(NewsroomError::InvalidFormat) => {
                error_body(StatusCode::BAD_REQUEST, NewsroomError::InvalidFormat.to_string())
            }
            ApiError::Core(NewsroomError::Conflict { message, existing }) => (
                StatusCode::CONFLICT,
                Json(json!({ "success": false, "message": message, "existing_post": existing })),
            )
                .into_response(),
            ApiError::Core(err) => {
                tracing::error!(error = %err, "request failed");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Store(StoreError::DuplicateSlug(_)) => {
                error_body(StatusCode::CONFLICT, "A post with this slug already exists")
            }
            ApiError::Store(StoreError::DuplicateKey(key)) => {
                error_body(StatusCode::CONFLICT, format!("\"{key}\" already exists"))
            }
            ApiError::Store(StoreError::NotFound(what)) => error_body(StatusCode::NOT_FOUND, format!("Not found: {what}")),
            ApiError::Store(err @ StoreError::Backend(_)) => {
                tracing::error!(error = %err, "storage failure");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, NewsroomError::from(err).to_string())
            }
        }
    }
}

/// JSON body extractor whose rejections use the API's error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_core::{ArticleStatus, ArticleSummary};
    use uuid::Uuid;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_format_is_bad_request() {
        let response = ApiError::from(NewsroomError::InvalidFormat).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid archive.org URL format");
    }

    #[tokio::test]
    async fn test_conflict_carries_existing_post() {
        let existing = ArticleSummary {
            id: Uuid::new_v4(),
            title: "Alt".to_string(),
            slug: "index.php/alt".to_string(),
            status: ArticleStatus::Published,
        };
        let response = ApiError::from(NewsroomError::conflict("This archive URL has already been imported", existing))
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["existing_post"]["slug"], "index.php/alt");
        assert_eq!(json["existing_post"]["status"], "published");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_server_error() {
        let response = ApiError::from(NewsroomError::FetchFailed("Failed to fetch archive: 404 Not Found".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Failed to fetch archive: 404 Not Found");
    }

    #[tokio::test]
    async fn test_store_errors() {
        let dup = ApiError::from(StoreError::DuplicateSlug("a".into())).into_response();
        assert_eq!(dup.status(), StatusCode::CONFLICT);

        let backend = ApiError::from(StoreError::Backend("connection reset".into())).into_response();
        assert_eq!(backend.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(backend).await["error"], "Database error: connection reset");
    }
}
