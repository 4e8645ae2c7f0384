//! AI formatting endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use newsroom_core::llm::{Formatter, resolve_model};
use newsroom_core::{FormattedArticle, NewsroomError, SeoCheck, score_article};
use serde::{Deserialize, Serialize};

use super::{ok, present};
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatRequest {
    #[serde(default)]
    raw_content: Option<String>,
    #[serde(default)]
    category_slug: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    success: bool,
    data: FormattedArticle,
    seo_checks: Vec<SeoCheck>,
}

fn formatter(state: &AppState) -> ApiResult<Arc<Formatter>> {
    state
        .formatter
        .clone()
        .ok_or_else(|| NewsroomError::Llm("ANTHROPIC_API_KEY is not configured".to_string()).into())
}

async fn current_model(state: &AppState) -> String {
    resolve_model(&*state.store, &*state.env).await
}

/// Formats raw notes and overwrites the model's self-reported score with the
/// computed one.
pub async fn format_content(
    State(state): State<AppState>, ApiJson(body): ApiJson<FormatRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(raw), Some(category)) = (present(&body.raw_content), present(&body.category_slug)) else {
        return Err(ApiError::BadRequest("Missing required fields: rawContent, categorySlug".to_string()));
    };

    let formatter = formatter(&state)?;
    let model = current_model(&state).await;
    let mut article = formatter.format_content(raw, category, &model).await?;

    let report = score_article(&article);
    article.seo_score = report.score as i32;

    Ok(Json(FormatResponse { success: true, data: article, seo_checks: report.checks }))
}

#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    instructions: Option<String>,
}

pub async fn improve_content(
    State(state): State<AppState>, ApiJson(body): ApiJson<ImproveRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(content), Some(instructions)) = (present(&body.content), present(&body.instructions)) else {
        return Err(ApiError::BadRequest("Missing required fields: content, instructions".to_string()));
    };

    let formatter = formatter(&state)?;
    let model = current_model(&state).await;
    let improved = formatter.improve_content(content, instructions, &model).await?;
    Ok(ok(improved))
}
