use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Key of the setting that selects the language model.
pub const AI_MODEL_KEY: &str = "ai_model";

/// A key/value application setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Setting {
    pub fn new(key: impl Into<String>, value: impl Into<String>, description: Option<String>) -> Self {
        Self { key: key.into(), value: value.into(), description, updated_at: OffsetDateTime::now_utc() }
    }
}
