//! Key/value settings, e.g. the AI model.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use newsroom_core::Setting;
use serde::Deserialize;

use super::{ok, present};
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SettingParams {
    key: Option<String>,
}

pub async fn get_settings(
    State(state): State<AppState>, Query(params): Query<SettingParams>,
) -> ApiResult<impl IntoResponse> {
    match present(&params.key) {
        Some(key) => {
            let setting =
                state.store.setting(key).await?.ok_or_else(|| ApiError::NotFound("Setting not found".to_string()))?;
            Ok(ok(setting).into_response())
        }
        None => Ok(ok(state.store.list_settings().await?).into_response()),
    }
}

#[derive(Debug, Deserialize)]
pub struct SettingBody {
    key: Option<String>,
    value: Option<String>,
    description: Option<String>,
}

impl SettingBody {
    fn key_and_value(&self) -> ApiResult<(&str, &str)> {
        // An empty value is allowed; a missing one is not.
        match (present(&self.key), self.value.as_deref()) {
            (Some(key), Some(value)) => Ok((key, value)),
            _ => Err(ApiError::BadRequest("Key and value are required".to_string())),
        }
    }
}

pub async fn update_setting(
    State(state): State<AppState>, ApiJson(body): ApiJson<SettingBody>,
) -> ApiResult<impl IntoResponse> {
    let (key, value) = body.key_and_value()?;
    let setting = state
        .store
        .update_setting(key, value)
        .await?
        .ok_or_else(|| ApiError::NotFound("Setting not found".to_string()))?;
    tracing::info!(key, "setting updated");
    Ok(ok(setting))
}

pub async fn create_setting(
    State(state): State<AppState>, ApiJson(body): ApiJson<SettingBody>,
) -> ApiResult<impl IntoResponse> {
    let (key, value) = body.key_and_value()?;
    let setting = Setting::new(key, value, body.description.clone());
    state.store.insert_setting(&setting).await?;
    tracing::info!(key, "setting created");
    Ok((StatusCode::CREATED, ok(setting)))
}
