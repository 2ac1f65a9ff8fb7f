pub mod articles;
pub mod auth;
pub mod comments;
pub mod profiles;
pub mod reactions;
pub mod tags;
pub mod users;
