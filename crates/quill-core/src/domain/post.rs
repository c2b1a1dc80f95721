use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const TITLE_MAX_LEN: usize = 100;
pub const SUMMARY_MAX_LEN: usize = 200;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Visible only to the owner.
    #[default]
    Draft,
    /// Visible to everyone.
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, PostStatus::Published)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(DomainError::validation(format!(
                "Unknown post status '{}', expected 'draft' or 'published'",
                other
            ))),
        }
    }
}

/// Post entity - a blog post owned by exactly one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub summary: Option<String>,
    pub body: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub summary: Option<String>,
    /// Defaults to [`PostStatus::Draft`].
    pub status: Option<PostStatus>,
}

/// Partial update of a post. `None` leaves the field untouched.
///
/// There is deliberately no owner field: ownership is fixed at creation.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
    /// `Some(None)` clears the summary.
    pub summary: Option<Option<String>>,
    pub status: Option<PostStatus>,
}

impl Post {
    /// Validate the input and build a new post owned by `owner_id`.
    pub fn create(owner_id: Uuid, new_post: NewPost) -> Result<Self, DomainError> {
        let title = normalize_title(&new_post.title)?;
        let summary = normalize_summary(new_post.summary)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            owner_id,
            title,
            summary,
            body: new_post.body,
            status: new_post.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update. Nothing is mutated if any field is invalid.
    pub fn apply(&mut self, changes: PostChanges) -> Result<(), DomainError> {
        let title = changes.title.as_deref().map(normalize_title).transpose()?;
        let summary = changes.summary.map(normalize_summary).transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(summary) = summary {
            self.summary = summary;
        }
        if let Some(body) = changes.body {
            self.body = body;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_draft(&self) -> bool {
        self.status == PostStatus::Draft
    }
}

fn normalize_title(raw: &str) -> Result<String, DomainError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(DomainError::validation("Title must not be empty"));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(DomainError::validation(format!(
            "Title must be at most {} characters",
            TITLE_MAX_LEN
        )));
    }
    Ok(title.to_string())
}

// Blank summaries are stored as absent.
fn normalize_summary(raw: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(summary) = raw else {
        return Ok(None);
    };
    let summary = summary.trim();
    if summary.is_empty() {
        return Ok(None);
    }
    if summary.chars().count() > SUMMARY_MAX_LEN {
        return Err(DomainError::validation(format!(
            "Summary must be at most {} characters",
            SUMMARY_MAX_LEN
        )));
    }
    Ok(Some(summary.to_string()))
}
