//! Import attempts and their lifecycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::article::ArticleStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Skipped,
}

impl ImportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportStatus::Pending => "pending",
            ImportStatus::Processing => "processing",
            ImportStatus::Completed => "completed",
            ImportStatus::Failed => "failed",
            ImportStatus::Skipped => "skipped",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ImportStatus::Completed | ImportStatus::Failed | ImportStatus::Skipped)
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "skipped" => Ok(Self::Skipped),
            _ => Err(format!("Invalid import status: {}", s)),
        }
    }
}

/// Refused transition out of a terminal state.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("import {id} is already {status}")]
pub struct TransitionError {
    pub id: Uuid,
    pub status: ImportStatus,
}

/// One row per attempt to recover an archived article.
///
/// Records are created in `processing` and move exactly once to a terminal
/// state. `post_id` is set iff completed and `error_message` iff failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveImport {
    pub id: Uuid,
    pub archive_url: String,
    pub original_url: String,
    pub status: ImportStatus,
    /// Back-reference to the created article. Deleting the article leaves
    /// it dangling; readers resolve it and treat a miss as "no article".
    pub post_id: Option<Uuid>,
    pub error_message: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ArchiveImport {
    pub fn start(archive_url: impl Into<String>, original_url: impl Into<String>, now: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            archive_url: archive_url.into(),
            original_url: original_url.into(),
            status: ImportStatus::Processing,
            post_id: None,
            error_message: None,
            created_at: now,
        }
    }

    pub fn complete(&mut self, post_id: Uuid) -> Result<(), TransitionError> {
        self.ensure_open()?;
        self.status = ImportStatus::Completed;
        self.post_id = Some(post_id);
        Ok(())
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), TransitionError> {
        self.ensure_open()?;
        self.status = ImportStatus::Failed;
        self.error_message = Some(message.into());
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), TransitionError> {
        if self.status.is_terminal() {
            return Err(TransitionError { id: self.id, status: self.status });
        }
        Ok(())
    }
}

/// The article fields joined onto a history row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedPost {
    pub title: String,
    pub slug: String,
    pub status: ArticleStatus,
}

/// A history row as shown in the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportHistoryEntry {
    #[serde(flatten)]
    pub import: ArchiveImport,
    pub post: Option<LinkedPost>,
}

/// History filter; newest first.
#[derive(Debug, Clone)]
pub struct ImportQuery {
    pub status: Option<ImportStatus>,
    pub limit: usize,
}

impl Default for ImportQuery {
    fn default() -> Self {
        Self { status: None, limit: 50 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ArchiveImport {
        ArchiveImport::start(
            "https://web.archive.org/web/20230101000000/https://ghanainsider.com/de/a/",
            "https://ghanainsider.com/de/a/",
            OffsetDateTime::now_utc(),
        )
    }

    #[test]
    fn test_starts_processing() {
        let record = record();
        assert_eq!(record.status, ImportStatus::Processing);
        assert!(record.post_id.is_none());
        assert!(record.error_message.is_none());
    }

    #[test]
    fn test_complete_sets_post() {
        let mut record = record();
        let post_id = Uuid::new_v4();
        record.complete(post_id).unwrap();
        assert_eq!(record.status, ImportStatus::Completed);
        assert_eq!(record.post_id, Some(post_id));
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut record = record();
        record.fail("Failed to fetch archive: 404 Not Found").unwrap();

        let err = record.complete(Uuid::new_v4()).unwrap_err();
        assert_eq!(err.status, ImportStatus::Failed);
        assert!(record.fail("again").is_err());
        assert_eq!(record.error_message.as_deref(), Some("Failed to fetch archive: 404 Not Found"));
        assert!(record.post_id.is_none());
    }

    #[test]
    fn test_history_entry_flattens_record() {
        let entry = ImportHistoryEntry { import: record(), post: None };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "processing");
        assert!(json["post"].is_null());
        assert!(json.get("archive_url").is_some());
    }
}
