//! Handlers for registration, login, token refresh and logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use haven_core::accounts::{validate_password, validate_username};
use haven_core::error::CoreError;
use haven_db::is_unique_violation;
use haven_db::models::session::CreateSession;
use haven_db::models::user::{CreateUser, User, UserResponse};
use haven_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{issue_access_token, refresh_token_digest, RefreshToken};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(max = 150, message = "Username must be at most 150 characters"))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Register a new account. Creates the user and an empty profile, then
/// signs the user in.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let username = input.username.trim().to_string();
    validate_username(&username)?;
    validate_password(&input.password)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username,
            email: input.email.trim().to_lowercase(),
            password_hash,
        },
    )
    .await
    .map_err(account_conflict)?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    let (response, session) = issue_tokens(&state, &user)?;
    SessionRepo::open(&state.pool, &session).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// POST /api/v1/users/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");

    let (response, session) = issue_tokens(&state, &user)?;
    SessionRepo::open(&state.pool, &session).await?;
    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. The old
/// session is revoked and the new one stored in the same transaction, so a
/// token can be redeemed at most once.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<impl IntoResponse> {
    let token_hash = refresh_token_digest(&input.refresh_token);

    let session = SessionRepo::find_redeemable(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid_refresh_token)?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let (response, next) = issue_tokens(&state, &user)?;
    if SessionRepo::rotate(&state.pool, session.id, &next).await?.is_none() {
        tracing::info!(user_id = user.id, session_id = session.id, "Refresh token already redeemed");
        return Err(invalid_refresh_token());
    }

    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(auth: AuthUser, State(state): State<AppState>) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Mint an access token and a refresh token for `user`. The caller stores
/// the returned session row before handing the response out.
fn issue_tokens(state: &AppState, user: &User) -> AppResult<(AuthResponse, CreateSession)> {
    let jwt = &state.config.jwt;
    let access_token = issue_access_token(user.id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh = RefreshToken::generate();

    let session = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh.hash,
        expires_at: Utc::now() + jwt.refresh_ttl(),
    };
    let response = AuthResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: jwt.access_ttl_secs(),
        user: UserResponse::from(user),
    };
    Ok((response, session))
}

fn invalid_refresh_token() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid or expired refresh token".into(),
    ))
}

/// Turn a username/email unique violation into a readable conflict.
pub(crate) fn account_conflict(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err, "uq_users_username") {
        AppError::Core(CoreError::Conflict(
            "A user with this username already exists".into(),
        ))
    } else if is_unique_violation(&err, "uq_users_email") {
        AppError::Core(CoreError::Conflict(
            "A user with this email already exists".into(),
        ))
    } else {
        AppError::Database(err)
    }
}
