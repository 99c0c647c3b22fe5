//! Post entity and its creation schema
//!
//! Wire names are camelCase, column names snake_case. The row struct is the
//! single mapping point between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ValidationError;

/// Maximum length for titles (matches `VARCHAR(256)`)
pub const MAX_TITLE_LEN: usize = 256;

/// Maximum length for content accepted by `create`
pub const MAX_CONTENT_LEN: usize = 256;

/// Persisted post row (table `post`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated post title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    /// Create a new title.
    ///
    /// # Rules
    /// - Not empty or whitespace only
    /// - Max 256 characters
    ///
    /// The value is stored exactly as supplied so that reads return what was written.
    ///
    /// # Example
    /// ```
    /// use acme_db::schema::PostTitle;
    ///
    /// assert!(PostTitle::new("Hello").is_ok());
    /// assert!(PostTitle::new("").is_err());
    /// assert!(PostTitle::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text(s, "title", MAX_TITLE_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated post content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    /// Create new content. Same rules as [`PostTitle`].
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text(s, "content", MAX_CONTENT_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn bounded_text(s: &str, field: &'static str, max: usize) -> Result<String, ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    // Postgres VARCHAR limits count characters, not bytes
    if s.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(s.to_owned())
}

/// Fields a client may supply when creating a post.
///
/// Server-assigned fields (`id`, `createdAt`, `updatedAt`) are rejected
/// as unknown fields rather than silently ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostSchema {
    pub title: String,
    pub content: String,
}

impl CreatePostSchema {
    /// Check field constraints, producing an insertable [`NewPost`].
    pub fn validate(self) -> Result<NewPost, ValidationError> {
        Ok(NewPost {
            title: PostTitle::new(&self.title)?,
            content: PostContent::new(&self.content)?,
        })
    }
}

/// A post that passed validation and may be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: PostTitle,
    pub content: PostContent,
}

/// `{ "id": "..." }` lookup input
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostIdInput {
    pub id: String,
}

impl PostIdInput {
    pub fn parse(&self) -> Result<Uuid, ValidationError> {
        parse_post_id(&self.id)
    }
}

/// Delete input: a bare id string or `{ "id": "..." }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeleteInput {
    Bare(String),
    Object(PostIdInput),
}

impl DeleteInput {
    pub fn parse(&self) -> Result<Uuid, ValidationError> {
        match self {
            Self::Bare(id) => parse_post_id(id),
            Self::Object(input) => input.parse(),
        }
    }
}

/// Parse a post identifier.
///
/// A string that is not a UUID can never name a row, so it is rejected as
/// invalid input instead of being sent to the database.
pub fn parse_post_id(raw: &str) -> Result<Uuid, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Empty { field: "id" });
    }

    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidFormat {
        field: "id",
        reason: "invalid UUID format",
    })
}
