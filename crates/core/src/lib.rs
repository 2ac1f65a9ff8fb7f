//! Domain rules for the Authors Haven backend.
//!
//! Everything here is pure (no I/O) so the repository and HTTP layers can
//! share the same slug, tag, comment-thread, reaction and account rules.

pub mod accounts;
pub mod articles;
pub mod comments;
pub mod error;
pub mod pagination;
pub mod reactions;
pub mod slug;
pub mod tags;
pub mod types;
