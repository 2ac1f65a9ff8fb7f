//! Repository for the `articles` table.
//!
//! Writes go through a transaction that also maintains `article_tags`.
//! Reads return [`ArticleDetail`], which carries the author, ordered tags
//! and reaction counts.

use std::collections::HashSet;

use haven_core::reactions::Presence;
use haven_core::slug::{allocate_slug, base_slug, is_candidate_of};
use haven_core::types::DbId;
use sqlx::PgPool;

use crate::{escape_like, is_unique_violation};
use crate::models::article::{Article, ArticleDetail, ArticlePatch, NewArticle};
use crate::repositories::tag_repo::TagRepo;

/// Column list for plain `articles` rows.
const COLUMNS: &str = "id, slug, title, description, body, image, time_to_read, \
    author_id, created_at, updated_at";

/// Projection for [`ArticleDetail`]; expects `articles a JOIN users u`.
const DETAIL_COLUMNS: &str = "a.id, a.slug, a.title, a.description, a.body, a.image, \
    a.time_to_read, a.author_id, u.username AS author_username, \
    ARRAY(SELECT t.name FROM article_tags atg JOIN tags t ON t.id = atg.tag_id \
          WHERE atg.article_id = a.id ORDER BY atg.position) AS tag_list, \
    (SELECT COUNT(*) FROM article_reactions r \
     WHERE r.article_id = a.id AND r.kind = 'vote' AND r.value = 1) AS likes, \
    (SELECT COUNT(*) FROM article_reactions r \
     WHERE r.article_id = a.id AND r.kind = 'vote' AND r.value = -1) AS dislikes, \
    (SELECT COUNT(*) FROM article_reactions r \
     WHERE r.article_id = a.id AND r.kind = 'favorite') AS favorites_count, \
    a.created_at, a.updated_at";

/// How many times `create` re-derives a slug after losing an insert race.
pub const MAX_SLUG_ATTEMPTS: u32 = 5;

/// Provides CRUD operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert an article with a freshly allocated slug, plus its tags.
    ///
    /// The slug is `base` or the first free `base-N`. If a concurrent insert
    /// claims the same slug first, the allocation is repeated up to
    /// [`MAX_SLUG_ATTEMPTS`] times before the unique violation is returned.
    pub async fn create(pool: &PgPool, input: &NewArticle<'_>) -> Result<Article, sqlx::Error> {
        let base = base_slug(input.title);
        let mut attempt = 1;

        loop {
            let taken = Self::taken_slugs(pool, &base).await?;
            let slug = allocate_slug(input.title, |candidate| taken.contains(candidate));

            match Self::insert_with_tags(pool, input, &slug).await {
                Ok(article) => return Ok(article),
                Err(e)
                    if attempt < MAX_SLUG_ATTEMPTS && is_unique_violation(&e, "uq_articles_slug") =>
                {
                    tracing::warn!(slug = %slug, attempt, "Slug taken concurrently, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Slugs already in use that are `base` or `base-N`.
    pub async fn taken_slugs(pool: &PgPool, base: &str) -> Result<HashSet<String>, sqlx::Error> {
        let pattern = format!("{}-%", escape_like(base));
        let slugs: Vec<String> = sqlx::query_scalar(
            "SELECT slug FROM articles WHERE slug = $1 OR slug LIKE $2 ESCAPE '\\'",
        )
        .bind(base)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;

        Ok(slugs
            .into_iter()
            .filter(|slug| is_candidate_of(base, slug))
            .collect())
    }

    async fn insert_with_tags(
        pool: &PgPool,
        input: &NewArticle<'_>,
        slug: &str,
    ) -> Result<Article, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO articles (slug, title, description, body, image, time_to_read, author_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let article = sqlx::query_as::<_, Article>(&query)
            .bind(slug)
            .bind(input.title)
            .bind(input.description)
            .bind(input.body)
            .bind(input.image)
            .bind(input.time_to_read)
            .bind(input.author_id)
            .fetch_one(&mut *tx)
            .await?;

        TagRepo::replace_for_article(&mut tx, article.id, input.tags).await?;

        tx.commit().await?;
        Ok(article)
    }

    /// Find an article row by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE slug = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find the full read model of an article by ID.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ArticleDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM articles a
             JOIN users u ON u.id = a.author_id
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, ArticleDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the full read model of an article by slug.
    pub async fn find_detail_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<ArticleDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM articles a
             JOIN users u ON u.id = a.author_id
             WHERE a.slug = $1"
        );
        sqlx::query_as::<_, ArticleDetail>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List articles, newest first.
    ///
    /// - `tags`: the article must carry every listed tag.
    /// - `author`, `title`: case-insensitive exact match.
    /// - `q`: case-insensitive substring of the title or author username,
    ///   matched literally (`%` and `_` are not wildcards).
    #[allow(clippy::too_many_arguments)]
    pub async fn list(
        pool: &PgPool,
        tags: Option<&[String]>,
        author: Option<&str>,
        title: Option<&str>,
        q: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ArticleDetail>, sqlx::Error> {
        let q_pattern = q.map(|q| format!("%{}%", escape_like(q)));
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM articles a
             JOIN users u ON u.id = a.author_id
             WHERE ($1::TEXT[] IS NULL OR (
                    SELECT COUNT(DISTINCT t.name) FROM article_tags atg
                    JOIN tags t ON t.id = atg.tag_id
                    WHERE atg.article_id = a.id AND t.name = ANY($1)
                ) = cardinality($1))
               AND ($2::TEXT IS NULL OR lower(u.username) = lower($2))
               AND ($3::TEXT IS NULL OR lower(a.title) = lower($3))
               AND ($4::TEXT IS NULL
                    OR a.title ILIKE $4 ESCAPE '\\'
                    OR u.username ILIKE $4 ESCAPE '\\')
             ORDER BY a.created_at DESC, a.id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, ArticleDetail>(&query)
            .bind(tags)
            .bind(author)
            .bind(title)
            .bind(q_pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List articles the user has favorited or bookmarked, most recent reaction first.
    pub async fn list_reacted_by(
        pool: &PgPool,
        user_id: DbId,
        kind: Presence,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ArticleDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM article_reactions mine
             JOIN articles a ON a.id = mine.article_id
             JOIN users u ON u.id = a.author_id
             WHERE mine.user_id = $1 AND mine.kind = $2
             ORDER BY mine.created_at DESC, mine.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ArticleDetail>(&query)
            .bind(user_id)
            .bind(kind.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a patch. The slug is never touched.
    ///
    /// When `patch.tags` is set the tag set is replaced in the same
    /// transaction. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &ArticlePatch<'_>,
    ) -> Result<Option<Article>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE articles SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                body = COALESCE($4, body),
                image = COALESCE($5, image),
                time_to_read = COALESCE($6, time_to_read)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(article) = sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.body)
            .bind(patch.image)
            .bind(patch.time_to_read)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(tags) = patch.tags {
            TagRepo::replace_for_article(&mut tx, article.id, tags).await?;
        }

        tx.commit().await?;
        Ok(Some(article))
    }

    /// Delete an article and, by cascade, its tags links, comments and reactions.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
