//! Route definitions for `/profiles`.

use axum::routing::get;
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Routes mounted at `/profiles`.
///
/// ```text
/// GET  /{username}  -> get_profile
/// PUT  /{username}  -> update_profile (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{username}",
        get(profiles::get_profile).put(profiles::update_profile),
    )
}
