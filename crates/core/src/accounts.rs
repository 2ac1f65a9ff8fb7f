//! Account rules: username and password policy, and resource ownership.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::DbId;

/// Minimum username length, in characters.
pub const MIN_USERNAME_LEN: usize = 4;

/// Password length bounds, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").expect("valid regex"));
static UPPER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static LOWER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]").expect("valid regex"));
static SPECIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[!@#$%^&.]").expect("valid regex"));

/// Validate a username: at least four characters and not digits only.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let username = username.trim();
    if username.chars().count() < MIN_USERNAME_LEN
        || username.chars().all(|c| c.is_ascii_digit())
    {
        return Err(CoreError::Validation(format!(
            "Username should be at least {MIN_USERNAME_LEN} characters long \
             and should not contain numbers only"
        )));
    }
    Ok(())
}

/// Validate password strength.
///
/// Requires 8..=128 characters with at least one digit, one uppercase
/// letter, one lowercase letter and one of `!@#$%^&.`.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at most {MAX_PASSWORD_LEN} characters long"
        )));
    }

    let strong = DIGIT_RE.is_match(password)
        && UPPER_RE.is_match(password)
        && LOWER_RE.is_match(password)
        && SPECIAL_RE.is_match(password);
    if !strong {
        return Err(CoreError::Validation(
            "Password should have at least one number, an uppercase and a lowercase \
             letter, and one special character"
                .into(),
        ));
    }
    Ok(())
}

/// Reject a mutation of `entity` by anyone but its owner.
pub fn ensure_owner(entity: &'static str, owner_id: DbId, user_id: DbId) -> Result<(), CoreError> {
    if owner_id != user_id {
        return Err(CoreError::Forbidden(format!(
            "Only the author of this {entity} may modify it"
        )));
    }
    Ok(())
}
