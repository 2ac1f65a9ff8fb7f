//! Article field validation and reading-time estimation.

use crate::error::CoreError;

/// Maximum title length, in characters.
pub const MAX_TITLE_LEN: usize = 120;

/// Maximum body length, in characters.
pub const MAX_BODY_LEN: usize = 100_000;

/// Average adult silent-reading speed used for `time_to_read`.
pub const WORDS_PER_MINUTE: usize = 200;

/// Cover image used when the author does not provide one.
pub const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/1024/768/?random";

/// Validate an article title (non-blank, bounded length).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an article description (non-blank).
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation("Description must not be empty".into()));
    }
    Ok(())
}

/// Validate an article body (non-blank, bounded length).
pub fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation("Body must not be empty".into()));
    }
    if body.chars().count() > MAX_BODY_LEN {
        return Err(CoreError::Validation(format!(
            "Body must be at most {MAX_BODY_LEN} characters"
        )));
    }
    Ok(())
}

/// Estimated reading time in whole minutes, rounded up. Never below 1 for a
/// non-empty body.
pub fn reading_time_minutes(body: &str) -> i32 {
    let words = body.split_whitespace().count();
    if words == 0 {
        return 0;
    }
    words.div_ceil(WORDS_PER_MINUTE).min(i32::MAX as usize) as i32
}
