//! The structured article produced by the AI formatter.
//!
//! Model output is loosely typed, so every field tolerates being absent or
//! `null` and falls back to an empty value.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedArticle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured_image_suggestion: String,
    #[serde(default = "empty_object", deserialize_with = "object_or_empty")]
    pub schema_markup: Value,
    #[serde(default, deserialize_with = "lenient_score")]
    pub seo_score: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seo_suggestions: Vec<String>,
}

impl Default for FormattedArticle {
    fn default() -> Self {
        Self {
            title: String::new(),
            meta_title: String::new(),
            meta_description: String::new(),
            slug: String::new(),
            content: String::new(),
            excerpt: String::new(),
            keywords: Vec::new(),
            featured_image_suggestion: String::new(),
            schema_markup: empty_object(),
            seo_score: 0,
            seo_suggestions: Vec::new(),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn object_or_empty<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => empty_object(),
        Some(value) => value,
    })
}

/// Accepts integers, floats and numeric strings; anything else is 0.
fn lenient_score<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let score = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    };
    Ok(score.round().clamp(0.0, 100.0) as i32)
}
