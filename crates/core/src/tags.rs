//! Tag list validation and normalization for articles.

use serde_json::Value;

use crate::error::CoreError;

/// Maximum number of distinct tags on one article.
pub const MAX_TAGS: usize = 20;

/// Maximum length of a single tag, in characters.
pub const MAX_TAG_LEN: usize = 50;

/// Validate a raw JSON `tag_list` value and return the normalized tags.
///
/// The value must be an array whose elements are all strings; an empty array
/// is valid and means "no tags".
pub fn validate_tags(candidate: &Value) -> Result<Vec<String>, CoreError> {
    let items = candidate.as_array().ok_or_else(|| {
        CoreError::Validation("tag_list must be a list of strings".into())
    })?;

    let mut raw = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let tag = item.as_str().ok_or_else(|| {
            CoreError::Validation(format!("tag_list[{index}] must be a string"))
        })?;
        raw.push(tag);
    }

    normalize_tags(&raw)
}

/// Trim and lowercase each tag, dropping duplicates while keeping the order
/// in which tags first appear.
///
/// Idempotent: normalizing an already-normalized list returns it unchanged.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Result<Vec<String>, CoreError> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());

    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if tag.is_empty() {
            return Err(CoreError::Validation("Tags must not be blank".into()));
        }
        if tag.chars().count() > MAX_TAG_LEN {
            return Err(CoreError::Validation(format!(
                "Each tag must be at most {MAX_TAG_LEN} characters"
            )));
        }
        if !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }

    if normalized.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "A maximum of {MAX_TAGS} tags is allowed"
        )));
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_list_is_valid() {
        assert_eq!(validate_tags(&json!([])).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn non_list_is_rejected() {
        assert_matches!(validate_tags(&json!("rust")), Err(CoreError::Validation(_)));
        assert_matches!(validate_tags(&json!({"a": 1})), Err(CoreError::Validation(_)));
        assert_matches!(validate_tags(&json!(7)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn non_string_element_is_rejected() {
        let err = validate_tags(&json!(["rust", 3])).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("tag_list[1]"));
    }

    #[test]
    fn trims_lowercases_and_dedupes_in_order() {
        let tags = validate_tags(&json!([" Rust ", "web", "rust", "WEB", "async"])).unwrap();
        assert_eq!(tags, vec!["rust", "web", "async"]);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_tags(&["Rust", " Axum", "sqlx "]).unwrap();
        let twice = normalize_tags(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn blank_tag_is_rejected() {
        assert_matches!(normalize_tags(&["ok", "   "]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_tag_is_rejected() {
        let long = "x".repeat(MAX_TAG_LEN + 1);
        assert_matches!(normalize_tags(&[long]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn too_many_distinct_tags_is_rejected() {
        let tags: Vec<String> = (0..=MAX_TAGS).map(|i| format!("t{i}")).collect();
        assert_matches!(normalize_tags(&tags), Err(CoreError::Validation(_)));

        // Duplicates do not count toward the limit.
        let mut dupes: Vec<String> = (0..MAX_TAGS).map(|i| format!("t{i}")).collect();
        dupes.push("t0".into());
        assert_eq!(normalize_tags(&dupes).unwrap().len(), MAX_TAGS);
    }
}
