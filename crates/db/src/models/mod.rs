//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row (plus any joined
//!   read-model columns)
//! - `Deserialize` DTOs for create and update payloads

pub mod article;
pub mod comment;
pub mod profile;
pub mod reaction;
pub mod session;
pub mod tag;
pub mod user;
