//! Offset pagination defaults shared by list endpoints.

/// Default page size for article listings.
pub const DEFAULT_ARTICLE_LIMIT: i64 = 20;

/// Default page size for comment and reply listings.
pub const DEFAULT_COMMENT_LIMIT: i64 = 10;

/// Upper bound on any page size.
pub const MAX_LIMIT: i64 = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
