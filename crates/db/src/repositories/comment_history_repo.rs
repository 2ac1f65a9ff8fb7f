//! Repository for the append-only `comment_history` table.

use haven_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::CommentHistory;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, comment_id, text, created_at";

/// Provides insert and read operations for comment history.
///
/// No update or delete: entries disappear only when
/// their comment is deleted (`ON DELETE CASCADE`).
pub struct CommentHistoryRepo;

impl CommentHistoryRepo {
    /// Record the text a comment held before an edit.
    pub(crate) async fn create(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        comment_id: DbId,
        previous_text: &str,
    ) -> Result<CommentHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO comment_history (comment_id, text)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommentHistory>(&query)
            .bind(comment_id)
            .bind(previous_text)
            .fetch_one(&mut **tx)
            .await
    }

    /// List a comment's prior texts, oldest first.
    pub async fn list_by_comment(
        pool: &PgPool,
        comment_id: DbId,
    ) -> Result<Vec<CommentHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comment_history
             WHERE comment_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, CommentHistory>(&query)
            .bind(comment_id)
            .fetch_all(pool)
            .await
    }
}
