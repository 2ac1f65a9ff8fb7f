//! Repository for the `tags` and `article_tags` tables.

use haven_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::TagUsage;

/// Provides tag listing and the transactional tag-replacement step used by
/// article writes.
pub struct TagRepo;

impl TagRepo {
    /// List tags that are attached to at least one article, most used first.
    pub async fn list_in_use(pool: &PgPool) -> Result<Vec<TagUsage>, sqlx::Error> {
        sqlx::query_as::<_, TagUsage>(
            "SELECT t.name, COUNT(atg.id) AS article_count
             FROM tags t
             JOIN article_tags atg ON atg.tag_id = t.id
             GROUP BY t.id, t.name
             ORDER BY article_count DESC, t.name",
        )
        .fetch_all(pool)
        .await
    }

    /// Replace the full tag set of an article: clear, then attach `tags` in order.
    ///
    /// Tags are created on first use. Callers pass already-normalized names.
    pub(crate) async fn replace_for_article(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        article_id: DbId,
        tags: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
            .bind(article_id)
            .execute(&mut **tx)
            .await?;

        for (position, name) in tags.iter().enumerate() {
            let tag_id: DbId = sqlx::query_scalar(
                "INSERT INTO tags (name) VALUES ($1)
                 ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                 RETURNING id",
            )
            .bind(name)
            .fetch_one(&mut **tx)
            .await?;

            sqlx::query(
                "INSERT INTO article_tags (article_id, tag_id, position) VALUES ($1, $2, $3)",
            )
            .bind(article_id)
            .bind(tag_id)
            .bind(position as i32)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
