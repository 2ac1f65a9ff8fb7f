//! Tag read models.

use serde::Serialize;
use sqlx::FromRow;

/// A tag name with the number of articles currently carrying it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagUsage {
    pub name: String,
    pub article_count: i64,
}
