//! Handlers for the tag listing.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use haven_db::repositories::TagRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tags
///
/// Tags attached to at least one article, most used first.
pub async fn list_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = TagRepo::list_in_use(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}
