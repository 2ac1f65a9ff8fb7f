pub mod articles;
pub mod auth;
pub mod health;
pub mod profiles;
pub mod tags;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                           register (public)
/// /users/login                                     login (public)
///
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /user                                            current user: get, update
/// /user/bookmarks                                  caller's bookmarked articles
/// /user/favorites                                  caller's favorited articles
///
/// /profiles/{username}                             get, update (owner only)
///
/// /articles                                        list (public), create
/// /articles/{slug}                                 get (public), update, delete (author only)
/// /articles/{slug}/like                            toggle like (POST)
/// /articles/{slug}/dislike                         toggle dislike (POST)
/// /articles/{slug}/favorite                        add (POST), remove (DELETE)
/// /articles/{slug}/bookmark                        add (POST), remove (DELETE)
/// /articles/{slug}/comments                        list (public), create
/// /articles/{slug}/comments/{id}                   get (public), update, delete (author only)
/// /articles/{slug}/comments/{id}/replies           list replies (public)
/// /articles/{slug}/comments/{id}/history           edit history (public)
///
/// /tags                                            tags in use (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Registration and login.
        .nest("/users", users::accounts_router())
        // Token refresh and logout.
        .nest("/auth", auth::router())
        // The authenticated caller.
        .nest("/user", users::current_user_router())
        .nest("/profiles", profiles::router())
        // Articles with their reactions and comment threads.
        .nest("/articles", articles::router())
        .nest("/tags", tags::router())
}
