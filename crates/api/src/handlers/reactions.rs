//! Handlers for article reactions: like/dislike votes, favorites and
//! bookmarks, plus the caller's favorite and bookmark lists.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use haven_core::pagination::{clamp_limit, clamp_offset, DEFAULT_ARTICLE_LIMIT, MAX_LIMIT};
use haven_core::reactions::{Presence, Vote};
use haven_db::models::reaction::PresenceOutcome;
use haven_db::repositories::{ArticleRepo, ReactionRepo};

use crate::error::AppResult;
use crate::handlers::articles::find_article;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Votes
// ---------------------------------------------------------------------------

/// POST /api/v1/articles/{slug}/like
pub async fn like_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    cast_vote(auth, state, slug, Vote::Like).await
}

/// POST /api/v1/articles/{slug}/dislike
pub async fn dislike_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    cast_vote(auth, state, slug, Vote::Dislike).await
}

async fn cast_vote(
    auth: AuthUser,
    state: AppState,
    slug: String,
    vote: Vote,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state, &slug).await?;
    let outcome = ReactionRepo::toggle_vote(&state.pool, auth.user_id, article.id, vote).await?;

    tracing::info!(
        article_id = article.id,
        user_id = auth.user_id,
        ?vote,
        applied = outcome.applied,
        "Vote toggled",
    );

    Ok(Json(DataResponse { data: outcome }))
}

// ---------------------------------------------------------------------------
// Favorites and bookmarks
// ---------------------------------------------------------------------------

/// POST /api/v1/articles/{slug}/favorite
pub async fn favorite_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    add_presence(auth, state, slug, Presence::Favorite).await
}

/// DELETE /api/v1/articles/{slug}/favorite
pub async fn unfavorite_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    remove_presence(auth, state, slug, Presence::Favorite).await
}

/// POST /api/v1/articles/{slug}/bookmark
pub async fn bookmark_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    add_presence(auth, state, slug, Presence::Bookmark).await
}

/// DELETE /api/v1/articles/{slug}/bookmark
pub async fn unbookmark_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    remove_presence(auth, state, slug, Presence::Bookmark).await
}

/// Add a presence reaction; a repeat is a conflict.
async fn add_presence(
    auth: AuthUser,
    state: AppState,
    slug: String,
    kind: Presence,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state, &slug).await?;

    if !ReactionRepo::add_presence(&state.pool, auth.user_id, article.id, kind).await? {
        return Err(kind.already_present(&slug).into());
    }

    tracing::info!(
        article_id = article.id,
        user_id = auth.user_id,
        kind = kind.as_str(),
        "Reaction added",
    );

    Ok(Json(DataResponse {
        data: PresenceOutcome { applied: true },
    }))
}

/// Remove a presence reaction; removing an absent one is not found.
async fn remove_presence(
    auth: AuthUser,
    state: AppState,
    slug: String,
    kind: Presence,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state, &slug).await?;

    if !ReactionRepo::remove_presence(&state.pool, auth.user_id, article.id, kind).await? {
        return Err(kind.not_present(&slug).into());
    }

    tracing::info!(
        article_id = article.id,
        user_id = auth.user_id,
        kind = kind.as_str(),
        "Reaction removed",
    );

    Ok(Json(DataResponse {
        data: PresenceOutcome { applied: false },
    }))
}

// ---------------------------------------------------------------------------
// Reading lists
// ---------------------------------------------------------------------------

/// GET /api/v1/user/bookmarks
pub async fn list_bookmarks(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    list_reacted(auth, state, params, Presence::Bookmark).await
}

/// GET /api/v1/user/favorites
pub async fn list_favorites(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    list_reacted(auth, state, params, Presence::Favorite).await
}

async fn list_reacted(
    auth: AuthUser,
    state: AppState,
    params: PaginationParams,
    kind: Presence,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_ARTICLE_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let articles =
        ArticleRepo::list_reacted_by(&state.pool, auth.user_id, kind, limit, offset).await?;

    Ok(Json(DataResponse { data: articles }))
}
