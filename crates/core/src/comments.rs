//! Comment thread rules and edit-history reconstruction.
//!
//! Threads are two levels deep: a comment is either top-level or a reply to
//! a top-level comment on the same article. Position is fixed at creation.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum comment length, in characters.
pub const MAX_COMMENT_LEN: usize = 5_000;

/// Where a comment sits in its article's thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadPosition {
    TopLevel,
    Reply { parent_id: DbId },
}

impl ThreadPosition {
    /// Interpret the `parent` field of a create request. Absent and `0` both
    /// mean top-level.
    pub fn from_parent(parent: Option<DbId>) -> Result<Self, CoreError> {
        match parent {
            None | Some(0) => Ok(Self::TopLevel),
            Some(id) if id > 0 => Ok(Self::Reply { parent_id: id }),
            Some(id) => Err(CoreError::Validation(format!(
                "parent must be 0 or a comment id, got {id}"
            ))),
        }
    }

    /// The parent id to persist (`None` for top-level comments).
    pub fn parent_id(self) -> Option<DbId> {
        match self {
            Self::TopLevel => None,
            Self::Reply { parent_id } => Some(parent_id),
        }
    }
}

/// The facts about a proposed parent comment that the thread rules need.
#[derive(Debug, Clone, Copy)]
pub struct ParentRef {
    pub id: DbId,
    pub article_id: DbId,
    pub parent_id: Option<DbId>,
}

/// Check that a reply may be attached to `parent` on `article_id`.
///
/// A missing parent, or one that belongs to another article, is reported as
/// not found. A parent that is itself a reply is a validation error.
pub fn check_reply_target(
    article_id: DbId,
    parent_id: DbId,
    parent: Option<&ParentRef>,
) -> Result<(), CoreError> {
    let parent = match parent {
        Some(p) if p.article_id == article_id => p,
        _ => {
            return Err(CoreError::NotFound {
                entity: "Comment",
                id: parent_id,
            })
        }
    };

    if parent.parent_id.is_some() {
        return Err(CoreError::Validation(
            "Replies can only be made to top-level comments".into(),
        ));
    }
    Ok(())
}

/// Validate comment text (non-blank, bounded length).
pub fn validate_comment_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation("text may not be blank".into()));
    }
    if text.chars().count() > MAX_COMMENT_LEN {
        return Err(CoreError::Validation(format!(
            "text must be at most {MAX_COMMENT_LEN} characters"
        )));
    }
    Ok(())
}

/// Rebuild every version of a comment, oldest first.
///
/// `history` must be ordered by creation; each entry holds the text that was
/// replaced by the following edit, so the current text closes the sequence.
pub fn reconstruct_versions<'a, I>(history: I, current: &'a str) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    history
        .into_iter()
        .chain(std::iter::once(current))
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn zero_and_absent_parent_are_top_level() {
        assert_eq!(ThreadPosition::from_parent(None).unwrap(), ThreadPosition::TopLevel);
        assert_eq!(ThreadPosition::from_parent(Some(0)).unwrap(), ThreadPosition::TopLevel);
        assert_eq!(ThreadPosition::TopLevel.parent_id(), None);
    }

    #[test]
    fn positive_parent_is_reply() {
        let pos = ThreadPosition::from_parent(Some(9)).unwrap();
        assert_eq!(pos, ThreadPosition::Reply { parent_id: 9 });
        assert_eq!(pos.parent_id(), Some(9));
    }

    #[test]
    fn negative_parent_is_rejected() {
        assert_matches!(ThreadPosition::from_parent(Some(-1)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn reply_to_missing_parent_is_not_found() {
        assert_matches!(
            check_reply_target(1, 5, None),
            Err(CoreError::NotFound { entity: "Comment", id: 5 })
        );
    }

    #[test]
    fn reply_to_parent_on_other_article_is_not_found() {
        let parent = ParentRef { id: 5, article_id: 2, parent_id: None };
        assert_matches!(check_reply_target(1, 5, Some(&parent)), Err(CoreError::NotFound { .. }));
    }

    #[test]
    fn reply_to_reply_is_rejected() {
        let parent = ParentRef { id: 5, article_id: 1, parent_id: Some(3) };
        assert_matches!(check_reply_target(1, 5, Some(&parent)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn reply_to_top_level_on_same_article_is_ok() {
        let parent = ParentRef { id: 5, article_id: 1, parent_id: None };
        assert!(check_reply_target(1, 5, Some(&parent)).is_ok());
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_matches!(validate_comment_text(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_comment_text("  \n"), Err(CoreError::Validation(_)));
        assert!(validate_comment_text("nice post").is_ok());
    }

    #[test]
    fn history_plus_current_rebuilds_every_version() {
        let history = ["v1", "v2"];
        assert_eq!(reconstruct_versions(history, "v3"), vec!["v1", "v2", "v3"]);
        assert_eq!(reconstruct_versions([], "only"), vec!["only"]);
    }
}
