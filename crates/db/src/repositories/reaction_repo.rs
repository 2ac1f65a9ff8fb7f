//! Repository for the `article_reactions` table.
//!
//! One table holds votes (`value` = +1/-1), favorites and bookmarks, keyed
//! by `(user_id, article_id, kind)`.

use haven_core::reactions::{vote_transition, Presence, Vote, VoteAction, PRESENCE_VALUE};
use haven_core::types::DbId;
use sqlx::PgPool;

use crate::models::reaction::{VoteCounts, VoteOutcome};

/// Provides the reaction toggles and counts.
pub struct ReactionRepo;

impl ReactionRepo {
    /// Toggle a like or dislike.
    ///
    /// No vote inserts one, the opposite vote is flipped in place, and the
    /// same vote withdraws it. A transaction-scoped advisory lock on
    /// `(user_id, article_id)` is taken before reading, so concurrent toggles
    /// by the same user serialize even when no vote row exists yet.
    pub async fn toggle_vote(
        pool: &PgPool,
        user_id: DbId,
        article_id: DbId,
        requested: Vote,
    ) -> Result<VoteOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "SELECT pg_advisory_xact_lock(
                hashtextextended('article_vote:' || $1::TEXT || ':' || $2::TEXT, 0)
             )",
        )
        .bind(user_id)
        .bind(article_id)
        .execute(&mut *tx)
        .await?;

        let current: Option<i16> = sqlx::query_scalar(
            "SELECT value FROM article_reactions
             WHERE user_id = $1 AND article_id = $2 AND kind = 'vote'",
        )
        .bind(user_id)
        .bind(article_id)
        .fetch_optional(&mut *tx)
        .await?;

        let action = vote_transition(current.and_then(Vote::from_value), requested);
        match action {
            VoteAction::Insert | VoteAction::Flip => {
                sqlx::query(
                    "INSERT INTO article_reactions (user_id, article_id, kind, value)
                     VALUES ($1, $2, 'vote', $3)
                     ON CONFLICT (user_id, article_id, kind)
                     DO UPDATE SET value = EXCLUDED.value",
                )
                .bind(user_id)
                .bind(article_id)
                .bind(requested.value())
                .execute(&mut *tx)
                .await?;
            }
            VoteAction::Remove => {
                sqlx::query(
                    "DELETE FROM article_reactions
                     WHERE user_id = $1 AND article_id = $2 AND kind = 'vote'",
                )
                .bind(user_id)
                .bind(article_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        let counts = Self::vote_counts(&mut tx, article_id).await?;
        tx.commit().await?;

        Ok(VoteOutcome {
            applied: action.applied(),
            likes: counts.likes,
            dislikes: counts.dislikes,
        })
    }

    async fn vote_counts(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        article_id: DbId,
    ) -> Result<VoteCounts, sqlx::Error> {
        sqlx::query_as::<_, VoteCounts>(VOTE_COUNTS_QUERY)
            .bind(article_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Add a favorite or bookmark.
    ///
    /// Returns `false` if the reaction was already present, including when a
    /// concurrent request inserted it first.
    pub async fn add_presence(
        pool: &PgPool,
        user_id: DbId,
        article_id: DbId,
        kind: Presence,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO article_reactions (user_id, article_id, kind, value)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, article_id, kind) DO NOTHING",
        )
        .bind(user_id)
        .bind(article_id)
        .bind(kind.as_str())
        .bind(PRESENCE_VALUE)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a favorite or bookmark. Returns `false` if it was not present.
    pub async fn remove_presence(
        pool: &PgPool,
        user_id: DbId,
        article_id: DbId,
        kind: Presence,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM article_reactions
             WHERE user_id = $1 AND article_id = $2 AND kind = $3",
        )
        .bind(user_id)
        .bind(article_id)
        .bind(kind.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

const VOTE_COUNTS_QUERY: &str = "SELECT \
    COUNT(*) FILTER (WHERE value = 1) AS likes, \
    COUNT(*) FILTER (WHERE value = -1) AS dislikes \
    FROM article_reactions WHERE article_id = $1 AND kind = 'vote'";
