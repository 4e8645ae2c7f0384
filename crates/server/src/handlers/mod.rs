//! Request handlers, grouped by resource.

pub mod ai;
pub mod archive;
pub mod authors;
pub mod categories;
pub mod posts;
pub mod settings;
pub mod site;

use axum::Json;
use serde::Serialize;

/// `{ "success": true, "data": ... }`
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope { success: true, data })
}

/// Treats blank strings like missing ones.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
