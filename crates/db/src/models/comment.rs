//! Comment and comment-history models and DTOs.

use haven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A `comments` row joined with its author's username and reply count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub article_id: DbId,
    pub user_id: DbId,
    pub author_username: String,
    /// `None` for top-level comments.
    pub parent_id: Option<DbId>,
    pub text: String,
    pub reply_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An immutable snapshot of a comment's text before one edit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentHistory {
    pub id: DbId,
    pub comment_id: DbId,
    pub text: String,
    pub created_at: Timestamp,
}

/// Request body for creating a comment. `parent` absent or `0` means top-level.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    #[serde(default)]
    pub parent: Option<DbId>,
    pub text: String,
}

/// Request body for editing a comment's text.
#[derive(Debug, Deserialize)]
pub struct UpdateComment {
    pub text: String,
}
