//! Route definitions for `/articles` and everything scoped to one article.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{articles, comments, reactions};
use crate::state::AppState;

/// Routes mounted at `/articles`.
///
/// ```text
/// GET    /                                   -> list_articles
/// POST   /                                   -> create_article
/// GET    /{slug}                             -> get_article
/// PUT    /{slug}                             -> update_article (author only)
/// DELETE /{slug}                             -> delete_article (author only)
///
/// POST   /{slug}/like                        -> like_article
/// POST   /{slug}/dislike                     -> dislike_article
/// POST   /{slug}/favorite                    -> favorite_article
/// DELETE /{slug}/favorite                    -> unfavorite_article
/// POST   /{slug}/bookmark                    -> bookmark_article
/// DELETE /{slug}/bookmark                    -> unbookmark_article
///
/// GET    /{slug}/comments                    -> list_comments
/// POST   /{slug}/comments                    -> create_comment
/// GET    /{slug}/comments/{id}               -> get_comment
/// PUT    /{slug}/comments/{id}               -> update_comment (author only)
/// DELETE /{slug}/comments/{id}               -> delete_comment (author only)
/// GET    /{slug}/comments/{id}/replies       -> list_replies
/// GET    /{slug}/comments/{id}/history       -> comment_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/{slug}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        // Reactions.
        .route("/{slug}/like", post(reactions::like_article))
        .route("/{slug}/dislike", post(reactions::dislike_article))
        .route(
            "/{slug}/favorite",
            post(reactions::favorite_article).delete(reactions::unfavorite_article),
        )
        .route(
            "/{slug}/bookmark",
            post(reactions::bookmark_article).delete(reactions::unbookmark_article),
        )
        // Comments.
        .route(
            "/{slug}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/{slug}/comments/{id}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route("/{slug}/comments/{id}/replies", get(comments::list_replies))
        .route("/{slug}/comments/{id}/history", get(comments::comment_history))
}
