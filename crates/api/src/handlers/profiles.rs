//! Handlers for public user profiles (`/profiles/{username}`).

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use haven_core::accounts::ensure_owner;
use haven_core::error::CoreError;
use haven_db::models::profile::{Profile, UpdateProfile};
use haven_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profiles/{username}
pub async fn get_profile(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let profile = find_profile(&state, &username).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profiles/{username}
///
/// Only the profile's owner may edit it.
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    let profile = find_profile(&state, &username).await?;
    ensure_owner("profile", profile.user_id, auth.user_id)?;

    let updated = ProfileRepo::update(&state.pool, auth.user_id, &input)
        .await?
        .ok_or_else(|| profile_not_found(&username))?;

    tracing::info!(user_id = auth.user_id, "Profile updated");

    Ok(Json(DataResponse { data: updated }))
}

async fn find_profile(state: &AppState, username: &str) -> AppResult<Profile> {
    ProfileRepo::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(|| profile_not_found(username))
}

fn profile_not_found(username: &str) -> AppError {
    AppError::Core(CoreError::NotFoundKey {
        entity: "Profile",
        key: username.to_string(),
    })
}
