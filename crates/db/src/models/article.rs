//! Article entity, read model and DTOs.

use haven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub image: String,
    pub time_to_read: i32,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An article with its author, tags and reaction counts, as served by the API.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleDetail {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub image: String,
    pub time_to_read: i32,
    pub author_id: DbId,
    pub author_username: String,
    pub tag_list: Vec<String>,
    pub likes: i64,
    pub dislikes: i64,
    pub favorites_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating an article.
///
/// `tag_list` stays untyped here so the tag normalizer can reject a
/// non-list value or a non-string element with a field-level message.
#[derive(Debug, Deserialize)]
pub struct CreateArticle {
    pub title: String,
    pub description: String,
    pub body: String,
    pub image: Option<String>,
    pub tag_list: Option<serde_json::Value>,
}

/// Request body for a partial article update.
///
/// Has no `slug` field: the slug is fixed at creation.
/// An absent `tag_list` leaves tags untouched; a present one replaces them.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,
    pub tag_list: Option<serde_json::Value>,
}

/// Validated fields for inserting an article.
#[derive(Debug)]
pub struct NewArticle<'a> {
    pub author_id: DbId,
    pub title: &'a str,
    pub description: &'a str,
    pub body: &'a str,
    pub image: &'a str,
    pub time_to_read: i32,
    pub tags: &'a [String],
}

/// Validated patch for an article. `None` leaves a column unchanged.
#[derive(Debug, Default)]
pub struct ArticlePatch<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub body: Option<&'a str>,
    pub image: Option<&'a str>,
    pub time_to_read: Option<i32>,
    pub tags: Option<&'a [String]>,
}

/// Query parameters for `GET /articles`.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleListParams {
    /// Comma-separated tag names; an article must carry all of them.
    pub tag: Option<String>,
    /// Author username, case-insensitive exact match.
    pub author: Option<String>,
    /// Title, case-insensitive exact match.
    pub title: Option<String>,
    /// Substring search across title and author username.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
