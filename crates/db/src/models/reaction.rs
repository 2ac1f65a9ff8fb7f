//! Reaction ledger models.

use serde::Serialize;
use sqlx::FromRow;

/// Like/dislike totals for one article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct VoteCounts {
    pub likes: i64,
    pub dislikes: i64,
}

/// Outcome of a like/dislike toggle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoteOutcome {
    pub applied: bool,
    pub likes: i64,
    pub dislikes: i64,
}

/// Outcome of a favorite/bookmark add or remove.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PresenceOutcome {
    pub applied: bool,
}
