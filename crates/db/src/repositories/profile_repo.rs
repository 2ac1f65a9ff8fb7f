//! Repository for the `profiles` table.

use haven_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{Profile, UpdateProfile};

/// Column list for profile reads (joined with `users` as `u`).
const COLUMNS: &str = "p.id, p.user_id, u.username, p.bio, p.image, p.company, \
    p.website, p.location, p.phone, p.created_at, p.updated_at";

/// Provides read and update operations for user profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Find the profile belonging to `username`.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles p
             JOIN users u ON u.id = p.user_id
             WHERE u.username = $1"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Apply a profile patch for `user_id`. Returns `None` if the user has no profile.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE profiles SET
                    bio = COALESCE($2, bio),
                    image = COALESCE($3, image),
                    company = COALESCE($4, company),
                    website = COALESCE($5, website),
                    location = COALESCE($6, location),
                    phone = COALESCE($7, phone)
                WHERE user_id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM updated p
             JOIN users u ON u.id = p.user_id"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.bio)
            .bind(&input.image)
            .bind(&input.company)
            .bind(&input.website)
            .bind(&input.location)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }
}
