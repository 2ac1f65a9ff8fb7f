//! Route definitions for accounts (`/users`) and the current user (`/user`).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, reactions, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST /        -> register
/// POST /login   -> login
/// ```
pub fn accounts_router() -> Router<AppState> {
    Router::new()
        .route("/", post(auth::register))
        .route("/login", post(auth::login))
}

/// Routes mounted at `/user`. All require authentication.
///
/// ```text
/// GET  /            -> get_current_user
/// PUT  /            -> update_current_user
/// GET  /bookmarks   -> list_bookmarks
/// GET  /favorites   -> list_favorites
/// ```
pub fn current_user_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(users::get_current_user).put(users::update_current_user),
        )
        .route("/bookmarks", get(reactions::list_bookmarks))
        .route("/favorites", get(reactions::list_favorites))
}
