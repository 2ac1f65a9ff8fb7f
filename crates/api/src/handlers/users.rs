//! Handlers for the current user (`/user`).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use haven_core::accounts::{validate_password, validate_username};
use haven_core::error::CoreError;
use haven_db::models::user::{UpdateUser, UserResponse};
use haven_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::handlers::auth::account_conflict;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /user`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCurrentUserRequest {
    #[validate(length(max = 150, message = "Username must be at most 150 characters"))]
    pub username: Option<String>,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: Option<String>,
    pub password: Option<String>,
}

/// GET /api/v1/user
pub async fn get_current_user(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/user
///
/// Update the caller's username, email and/or password.
pub async fn update_current_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateCurrentUserRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let username = match input.username {
        Some(name) => {
            let name = name.trim().to_string();
            validate_username(&name)?;
            Some(name)
        }
        None => None,
    };

    let password_hash = match input.password.as_deref() {
        Some(password) => {
            validate_password(password)?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let update = UpdateUser {
        username,
        email: input.email.map(|e| e.trim().to_lowercase()),
        password_hash,
    };

    let user = UserRepo::update(&state.pool, auth.user_id, &update)
        .await
        .map_err(account_conflict)?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = user.id, "User updated");

    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}
