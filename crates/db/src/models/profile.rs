//! Public profile model and DTOs.

use haven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A `profiles` row joined with the owner's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub bio: String,
    pub image: Option<String>,
    pub company: String,
    pub website: String,
    pub location: String,
    pub phone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for editing a profile. Absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfile {
    pub bio: Option<String>,
    pub image: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
}
