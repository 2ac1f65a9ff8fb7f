//! Handlers for comments under `/articles/{slug}/comments`.
//!
//! Threads are two levels deep. Reads are public; edits and deletes are
//! restricted to the comment's author. Each edit snapshots the replaced
//! text into the comment's history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use haven_core::accounts::ensure_owner;
use haven_core::comments::{
    check_reply_target, reconstruct_versions, validate_comment_text, ThreadPosition,
};
use haven_core::error::CoreError;
use haven_core::pagination::{clamp_limit, clamp_offset, DEFAULT_COMMENT_LIMIT, MAX_LIMIT};
use haven_core::types::DbId;
use haven_db::models::comment::{Comment, CommentHistory, CreateComment, UpdateComment};
use haven_db::repositories::{CommentHistoryRepo, CommentRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::articles::find_article;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload for `GET /articles/{slug}/comments/{id}/history`.
#[derive(Debug, Serialize)]
pub struct CommentHistoryResponse {
    pub comment_id: DbId,
    /// The comment's text now.
    pub current: String,
    /// Replaced texts, oldest first.
    pub history: Vec<CommentHistory>,
    /// Every text the comment has had, oldest first, ending with `current`.
    pub versions: Vec<String>,
}

/// GET /api/v1/articles/{slug}/comments
///
/// Top-level comments, oldest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state, &slug).await?;

    let limit = clamp_limit(params.limit, DEFAULT_COMMENT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let comments = CommentRepo::list_top_level(&state.pool, article.id, limit, offset).await?;

    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/articles/{slug}/comments
///
/// `parent` absent or `0` creates a top-level comment; otherwise it must be
/// a top-level comment on the same article.
pub async fn create_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<CreateComment>,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state, &slug).await?;
    validate_comment_text(&input.text)?;

    let position = ThreadPosition::from_parent(input.parent)?;
    if let ThreadPosition::Reply { parent_id } = position {
        let parent = CommentRepo::find_parent_ref(&state.pool, parent_id).await?;
        check_reply_target(article.id, parent_id, parent.as_ref())?;
    }

    let comment = CommentRepo::create(
        &state.pool,
        article.id,
        auth.user_id,
        position.parent_id(),
        &input.text,
    )
    .await?;

    tracing::info!(
        comment_id = comment.id,
        article_id = article.id,
        parent_id = ?comment.parent_id,
        user_id = auth.user_id,
        "Comment created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// GET /api/v1/articles/{slug}/comments/{id}
pub async fn get_comment(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let comment = find_comment(&state, &slug, id).await?;
    Ok(Json(DataResponse { data: comment }))
}

/// GET /api/v1/articles/{slug}/comments/{id}/replies
pub async fn list_replies(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, DbId)>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let comment = find_comment(&state, &slug, id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_COMMENT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let replies = CommentRepo::list_replies(&state.pool, comment.id, limit, offset).await?;

    Ok(Json(DataResponse { data: replies }))
}

/// PUT /api/v1/articles/{slug}/comments/{id}
///
/// Replace the text. The previous text is appended to the history.
pub async fn update_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, DbId)>,
    Json(input): Json<UpdateComment>,
) -> AppResult<impl IntoResponse> {
    let comment = find_comment(&state, &slug, id).await?;
    ensure_owner("comment", comment.user_id, auth.user_id)?;
    validate_comment_text(&input.text)?;

    let updated = CommentRepo::update_text(&state.pool, comment.id, &input.text)
        .await?
        .ok_or_else(|| comment_not_found(id))?;

    tracing::info!(comment_id = id, user_id = auth.user_id, "Comment updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/articles/{slug}/comments/{id}
///
/// Deleting a top-level comment also deletes its replies.
pub async fn delete_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let comment = find_comment(&state, &slug, id).await?;
    ensure_owner("comment", comment.user_id, auth.user_id)?;

    if !CommentRepo::delete(&state.pool, comment.id).await? {
        return Err(comment_not_found(id));
    }

    tracing::info!(comment_id = id, user_id = auth.user_id, "Comment deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/articles/{slug}/comments/{id}/history
pub async fn comment_history(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let comment = find_comment(&state, &slug, id).await?;
    let history = CommentHistoryRepo::list_by_comment(&state.pool, comment.id).await?;
    let versions = reconstruct_versions(history.iter().map(|h| h.text.as_str()), &comment.text)
        .into_iter()
        .map(str::to_owned)
        .collect();

    Ok(Json(DataResponse {
        data: CommentHistoryResponse {
            comment_id: comment.id,
            current: comment.text,
            history,
            versions,
        },
    }))
}

/// Resolve a comment that must belong to the article at `slug`.
async fn find_comment(state: &AppState, slug: &str, id: DbId) -> AppResult<Comment> {
    let article = find_article(state, slug).await?;
    CommentRepo::find_in_article(&state.pool, article.id, id)
        .await?
        .ok_or_else(|| comment_not_found(id))
}

fn comment_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Comment",
        id,
    })
}
