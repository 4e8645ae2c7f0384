//! Error types for newsroom operations.
//!
//! [`NewsroomError`] covers every way the import pipeline, the extraction
//! engine and the AI formatter can fail. Storage adapters report the narrower
//! [`StoreError`](crate::store::StoreError), which converts into
//! [`NewsroomError::Persistence`] at the boundary.
//!
//! # Example
//!
//! ```rust
//! use newsroom_core::{NewsroomError, Result};
//!
//! fn require_body(html: &str) -> Result<&str> {
//!     if html.trim().is_empty() {
//!         return Err(NewsroomError::NoContentFound);
//!     }
//!     Ok(html)
//! }
//! # assert!(require_body("").is_err());
//! ```

use thiserror::Error;

use crate::article::ArticleSummary;
use crate::store::StoreError;

/// Main error type for newsroom operations.
///
/// The first five variants form the import taxonomy and map one-to-one onto
/// HTTP status codes in the server: `InvalidFormat` is a client error,
/// `Conflict` is an expected outcome of normal use, everything else is a
/// server-side failure.
#[derive(Error, Debug)]
pub enum NewsroomError {
    /// The snapshot URL does not look like `<archive-host>/web/<digits>/<url>`.
    #[error("Invalid archive.org URL format")]
    InvalidFormat,

    /// The snapshot (or the slug it resolves to) was already imported.
    ///
    /// Carries the article that is already live so callers can link to it.
    #[error("{message}")]
    Conflict { message: String, existing: Box<ArticleSummary> },

    /// The archive could not be retrieved.
    ///
    /// Non-success status codes, transport failures and timeouts all end up
    /// here with the underlying reason as the message.
    #[error("{0}")]
    FetchFailed(String),

    /// The snapshot has no element matching the main-content selector.
    #[error("No article content found in the HTML. The page structure may be different or the content is missing.")]
    NoContentFound,

    /// The storage layer rejected or failed an operation.
    #[error("Database error: {0}")]
    Persistence(String),

    /// A URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML or CSS selector parsing failed.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The language-model API returned an error or could not be reached.
    #[error("Failed to format content: {0}")]
    Llm(String),

    /// The language model answered with something that is not the expected JSON.
    #[error("Failed to format content: invalid model response: {0}")]
    InvalidResponse(String),

    /// Missing or inconsistent configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl NewsroomError {
    /// Builds a conflict pointing at an article that already exists.
    pub fn conflict(message: impl Into<String>, existing: ArticleSummary) -> Self {
        NewsroomError::Conflict { message: message.into(), existing: Box::new(existing) }
    }

    /// Whether this error is a duplicate detection rather than a failure.
    pub fn is_conflict(&self) -> bool {
        matches!(self, NewsroomError::Conflict { .. })
    }
}

impl From<StoreError> for NewsroomError {
    fn from(err: StoreError) -> Self {
        NewsroomError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for NewsroomError {
    fn from(err: serde_json::Error) -> Self {
        NewsroomError::InvalidResponse(err.to_string())
    }
}

/// Result type alias for NewsroomError.
pub type Result<T> = std::result::Result<T, NewsroomError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::ArticleStatus;
    use uuid::Uuid;

    #[test]
    fn test_invalid_format_message() {
        assert_eq!(NewsroomError::InvalidFormat.to_string(), "Invalid archive.org URL format");
    }

    #[test]
    fn test_conflict_carries_existing_article() {
        let existing = ArticleSummary {
            id: Uuid::new_v4(),
            title: "Alt".to_string(),
            slug: "index.php/alt".to_string(),
            status: ArticleStatus::Published,
        };
        let err = NewsroomError::conflict("This URL was already imported", existing);

        assert!(err.is_conflict());
        assert_eq!(err.to_string(), "This URL was already imported");
        match err {
            NewsroomError::Conflict { existing, .. } => assert_eq!(existing.slug, "index.php/alt"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_store_error_becomes_persistence() {
        let err: NewsroomError = StoreError::Backend("connection reset".to_string()).into();
        assert!(matches!(err, NewsroomError::Persistence(_)));
        assert!(err.to_string().contains("connection reset"));
    }
}
