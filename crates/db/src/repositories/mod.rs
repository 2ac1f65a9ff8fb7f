//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod article_repo;
pub mod comment_history_repo;
pub mod comment_repo;
pub mod profile_repo;
pub mod reaction_repo;
pub mod session_repo;
pub mod tag_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use comment_history_repo::CommentHistoryRepo;
pub use comment_repo::CommentRepo;
pub use profile_repo::ProfileRepo;
pub use reaction_repo::ReactionRepo;
pub use session_repo::SessionRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
