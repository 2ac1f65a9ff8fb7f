//! Refresh-token sessions.
//!
//! A session row is the server-side half of a refresh token: only the
//! SHA-256 of the token is stored. Refreshing rotates the row, logout
//! revokes every row the user holds.

use haven_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::session::{CreateSession, UserSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, \
                        created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Open a fresh session for a user who just registered or logged in.
    pub async fn open(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        insert(pool, input).await
    }

    /// Look up a session that can still be redeemed: not revoked, not expired.
    pub async fn find_redeemable(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Replace session `old_id` with `next` atomically.
    ///
    /// Returns `None` when `old_id` was already revoked, i.e. another refresh
    /// redeemed the same token first. If inserting `next` fails the old
    /// session stays active.
    pub async fn rotate(
        pool: &PgPool,
        old_id: DbId,
        next: &CreateSession,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let revoked = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE id = $1 AND is_revoked = false",
        )
        .bind(old_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if revoked == 0 {
            return Ok(None);
        }

        let session = insert(&mut *tx, next).await?;
        tx.commit().await?;
        Ok(Some(session))
    }

    /// Revoke every live session of a user. Returns how many were revoked.
    pub async fn revoke_all(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}

async fn insert<'e, E>(executor: E, input: &CreateSession) -> Result<UserSession, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let query = format!(
        "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
         VALUES ($1, $2, $3)
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, UserSession>(&query)
        .bind(input.user_id)
        .bind(&input.refresh_token_hash)
        .bind(input.expires_at)
        .fetch_one(executor)
        .await
}
