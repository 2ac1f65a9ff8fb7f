//! Repository for the `comments` table.
//!
//! Reads join the author's username and count direct replies. Edits write a
//! history row in the same transaction as the text change.

use haven_core::comments::ParentRef;
use haven_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::Comment;
use crate::repositories::comment_history_repo::CommentHistoryRepo;

/// Projection for [`Comment`]; expects `comments c JOIN users u`.
const COLUMNS: &str = "c.id, c.article_id, c.user_id, u.username AS author_username, \
    c.parent_id, c.text, \
    (SELECT COUNT(*) FROM comments r WHERE r.parent_id = c.id) AS reply_count, \
    c.created_at, c.updated_at";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment. `parent_id` must already have passed the thread rules.
    pub async fn create(
        pool: &PgPool,
        article_id: DbId,
        user_id: DbId,
        parent_id: Option<DbId>,
        text: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO comments (article_id, user_id, parent_id, text)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {COLUMNS} FROM inserted c
             JOIN users u ON u.id = c.user_id"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(article_id)
            .bind(user_id)
            .bind(parent_id)
            .bind(text)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by ID regardless of article, as thread-rule input.
    pub async fn find_parent_ref(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ParentRef>, sqlx::Error> {
        let row: Option<(DbId, DbId, Option<DbId>)> =
            sqlx::query_as("SELECT id, article_id, parent_id FROM comments WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(id, article_id, parent_id)| ParentRef {
            id,
            article_id,
            parent_id,
        }))
    }

    /// Find a comment that belongs to `article_id`.
    pub async fn find_in_article(
        pool: &PgPool,
        article_id: DbId,
        id: DbId,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.id = $1 AND c.article_id = $2"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(article_id)
            .fetch_optional(pool)
            .await
    }

    /// List an article's top-level comments, oldest first.
    pub async fn list_top_level(
        pool: &PgPool,
        article_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.article_id = $1 AND c.parent_id IS NULL
             ORDER BY c.created_at ASC, c.id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(article_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List the replies to one comment, oldest first.
    pub async fn list_replies(
        pool: &PgPool,
        parent_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.parent_id = $1
             ORDER BY c.created_at ASC, c.id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(parent_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Replace a comment's text, recording the old text as a history entry.
    ///
    /// The row is locked for the duration so concurrent edits serialize and
    /// each one snapshots the text it actually replaced. Every call adds one
    /// history entry, even when the text is unchanged. Returns `None` if the
    /// comment does not exist.
    pub async fn update_text(
        pool: &PgPool,
        id: DbId,
        text: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<String> =
            sqlx::query_scalar("SELECT text FROM comments WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(previous) = previous else {
            return Ok(None);
        };

        CommentHistoryRepo::create(&mut tx, id, &previous).await?;

        let query = format!(
            "WITH updated AS (
                UPDATE comments SET text = $2 WHERE id = $1 RETURNING *
             )
             SELECT {COLUMNS} FROM updated c
             JOIN users u ON u.id = c.user_id"
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(text)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(comment))
    }

    /// Delete a comment. Replies and history go with it by cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
