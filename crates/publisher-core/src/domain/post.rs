use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const TITLE_MAX_CHARS: usize = 128;
pub const PREVIEW_TEXT_MAX_CHARS: usize = 512;
pub const CONTENT_MAX_CHARS: usize = 4096;
pub const SLUG_MAX_CHARS: usize = 100;

/// Number of content characters considered when deriving a preview.
const PREVIEW_WINDOW: usize = 512;

/// Post entity - a published blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub preview_text: String,
    pub content: String,
    pub slug: String,
}

/// Author-supplied fields of a post that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub preview_text: String,
    #[serde(default)]
    pub content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            ..Default::default()
        }
    }

    pub fn with_preview_text(mut self, preview_text: impl Into<String>) -> Self {
        self.preview_text = preview_text.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

impl Post {
    /// Create a new post from a draft. `created_at` is fixed here for the post's lifetime.
    pub fn new(id: Uuid, author_id: Uuid, draft: PostDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            author_id,
            title: draft.title,
            created_at,
            preview_text: draft.preview_text,
            content: draft.content,
            slug: draft.slug,
        }
    }

    /// Text shown in listings when no explicit preview was written.
    ///
    /// Returns `preview_text` when it is set. Otherwise takes the first 512
    /// characters of `content` and drops everything after the last space.
    pub fn preview(&self) -> &str {
        if !self.preview_text.is_empty() {
            return &self.preview_text;
        }

        let window = match self.content.char_indices().nth(PREVIEW_WINDOW) {
            Some((end, _)) => &self.content[..end],
            None => &self.content,
        };

        match window.rsplit_once(' ') {
            Some((head, _)) => head,
            None => window,
        }
    }

    /// Check field limits before the post is written.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("Title must be provided"));
        }
        check_length("title", &self.title, TITLE_MAX_CHARS)?;
        check_length("preview_text", &self.preview_text, PREVIEW_TEXT_MAX_CHARS)?;
        check_length("content", &self.content, CONTENT_MAX_CHARS)?;

        if self.slug.is_empty() {
            return Err(DomainError::validation("Slug must be provided"));
        }
        check_length("slug", &self.slug, SLUG_MAX_CHARS)?;
        if !is_slug(&self.slug) {
            return Err(DomainError::validation(
                "Slug may only contain letters, numbers, hyphens and underscores",
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max} characters (got {len})"
        )));
    }
    Ok(())
}

fn is_slug(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
