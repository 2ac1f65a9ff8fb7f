//! Reaction ledger rules: like/dislike votes plus presence-only favorites
//! and bookmarks.
//!
//! All three kinds share one table keyed by `(user_id, article_id, kind)`,
//! so a user holds at most one vote per article and a like/dislike switch
//! flips the existing record rather than adding a second one.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Stored `value` for presence-only reactions.
pub const PRESENCE_VALUE: i16 = 1;

/// A presence-only reaction. Stored with `kind` = [`Presence::as_str`];
/// votes use `kind = 'vote'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Favorite,
    Bookmark,
}

impl Presence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Favorite => "favorite",
            Self::Bookmark => "bookmark",
        }
    }

    /// Error for adding a reaction the user already holds.
    pub fn already_present(self, slug: &str) -> CoreError {
        let verb = match self {
            Self::Favorite => "favorited",
            Self::Bookmark => "bookmarked",
        };
        CoreError::Conflict(format!("Article '{slug}' is already {verb}"))
    }

    /// Error for removing a reaction the user does not hold.
    pub fn not_present(self, slug: &str) -> CoreError {
        let entity = match self {
            Self::Favorite => "Favorite",
            Self::Bookmark => "Bookmark",
        };
        CoreError::NotFoundKey {
            entity,
            key: slug.to_string(),
        }
    }
}

/// A like or dislike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Like,
    Dislike,
}

impl Vote {
    /// Stored `value` for this vote: `+1` or `-1`.
    pub fn value(self) -> i16 {
        match self {
            Self::Like => 1,
            Self::Dislike => -1,
        }
    }

    pub fn from_value(value: i16) -> Option<Self> {
        match value {
            1 => Some(Self::Like),
            -1 => Some(Self::Dislike),
            _ => None,
        }
    }
}

/// What to do with the vote record when a user casts `requested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    /// No record yet: insert one.
    Insert,
    /// A record with the opposite value exists: overwrite its value.
    Flip,
    /// The same vote again: withdraw it.
    Remove,
}

impl VoteAction {
    /// Whether the requested vote is in effect afterwards.
    pub fn applied(self) -> bool {
        !matches!(self, Self::Remove)
    }
}

/// Decide the existence-based toggle for a vote.
pub fn vote_transition(current: Option<Vote>, requested: Vote) -> VoteAction {
    match current {
        None => VoteAction::Insert,
        Some(existing) if existing == requested => VoteAction::Remove,
        Some(_) => VoteAction::Flip,
    }
}
