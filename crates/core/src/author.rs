//! Bylines that can be attached to posts.
//!
//! At most one author is the default. Stores keep that invariant: saving an
//! author with `is_default` clears the flag on every other row first.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub is_default: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Input for creating an author.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// A partial edit; `null` clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::article::nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::article::nullable")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::article::nullable")]
    pub avatar_url: Option<Option<String>>,
    pub is_default: Option<bool>,
}

impl Author {
    pub fn from_new(new: NewAuthor, now: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            bio: new.bio,
            avatar_url: new.avatar_url,
            is_default: new.is_default,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: AuthorPatch, now: OffsetDateTime) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(avatar_url) = patch.avatar_url {
            self.avatar_url = avatar_url;
        }
        if let Some(is_default) = patch.is_default {
            self.is_default = is_default;
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_author_defaults_to_not_default() {
        let new: NewAuthor = serde_json::from_value(serde_json::json!({ "name": "Redaktion" })).unwrap();
        let author = Author::from_new(new, OffsetDateTime::now_utc());
        assert!(!author.is_default);
        assert!(author.email.is_none());
    }

    #[test]
    fn test_patch_clears_bio() {
        let now = OffsetDateTime::now_utc();
        let mut author = Author::from_new(
            NewAuthor { name: "Ama".to_string(), bio: Some("Reporterin".to_string()), ..Default::default() },
            now,
        );

        let patch: AuthorPatch = serde_json::from_value(serde_json::json!({ "bio": null })).unwrap();
        author.apply(patch, now);

        assert!(author.bio.is_none());
        assert_eq!(author.name, "Ama");
    }
}
