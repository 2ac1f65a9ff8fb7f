//! Handlers for the `/articles` resource.
//!
//! Reads are public. Creating requires authentication; updating and deleting
//! are restricted to the article's author. The slug is derived from the
//! title once, at creation, and never changes afterwards.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use haven_core::accounts::ensure_owner;
use haven_core::articles::{
    reading_time_minutes, validate_body, validate_description, validate_title, DEFAULT_IMAGE_URL,
};
use haven_core::error::CoreError;
use haven_core::pagination::{clamp_limit, clamp_offset, DEFAULT_ARTICLE_LIMIT, MAX_LIMIT};
use haven_core::tags::{normalize_tags, validate_tags};
use haven_core::types::DbId;
use haven_db::models::article::{
    Article, ArticleDetail, ArticleListParams, ArticlePatch, CreateArticle, NewArticle,
    UpdateArticle,
};
use haven_db::repositories::ArticleRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/articles
///
/// List articles, newest first. Supports `?tag=a,b&author=&title=&q=&limit=&offset=`.
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ArticleListParams>,
) -> AppResult<impl IntoResponse> {
    let tags = match params.tag.as_deref() {
        Some(raw) => {
            let parts: Vec<&str> = raw.split(',').filter(|t| !t.trim().is_empty()).collect();
            let tags = normalize_tags(&parts)?;
            (!tags.is_empty()).then_some(tags)
        }
        None => None,
    };

    let limit = clamp_limit(params.limit, DEFAULT_ARTICLE_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let articles = ArticleRepo::list(
        &state.pool,
        tags.as_deref(),
        non_blank(params.author.as_deref()),
        non_blank(params.title.as_deref()),
        non_blank(params.q.as_deref()),
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse { data: articles }))
}

/// POST /api/v1/articles
///
/// Create an article owned by the caller. Returns 201 with the new article.
pub async fn create_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateArticle>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)?;
    validate_description(&input.description)?;
    validate_body(&input.body)?;

    let tags = match &input.tag_list {
        Some(value) => validate_tags(value)?,
        None => Vec::new(),
    };
    let image = input
        .image
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_IMAGE_URL);

    let new_article = NewArticle {
        author_id: auth.user_id,
        title: input.title.trim(),
        description: input.description.trim(),
        body: &input.body,
        image,
        time_to_read: reading_time_minutes(&input.body),
        tags: &tags,
    };
    let article = ArticleRepo::create(&state.pool, &new_article).await?;

    tracing::info!(
        article_id = article.id,
        slug = %article.slug,
        user_id = auth.user_id,
        "Article created",
    );

    let detail = load_detail(&state, article.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/articles/{slug}
pub async fn get_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let detail = ArticleRepo::find_detail_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| article_not_found(&slug))?;

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/articles/{slug}
///
/// Partial update by the author. A present `tag_list` replaces the tags;
/// an absent or null one leaves them alone. The slug is kept.
pub async fn update_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<UpdateArticle>,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state, &slug).await?;
    ensure_owner("article", article.author_id, auth.user_id)?;

    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(description) = &input.description {
        validate_description(description)?;
    }
    if let Some(body) = &input.body {
        validate_body(body)?;
    }
    let tags = input.tag_list.as_ref().map(validate_tags).transpose()?;

    let patch = ArticlePatch {
        title: input.title.as_deref().map(str::trim),
        description: input.description.as_deref().map(str::trim),
        body: input.body.as_deref(),
        image: input.image.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        time_to_read: input.body.as_deref().map(reading_time_minutes),
        tags: tags.as_deref(),
    };

    ArticleRepo::update(&state.pool, article.id, &patch)
        .await?
        .ok_or_else(|| article_not_found(&slug))?;

    tracing::info!(article_id = article.id, user_id = auth.user_id, "Article updated");

    let detail = load_detail(&state, article.id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/articles/{slug}
///
/// Delete by the author. Comments, tag links and reactions go with it.
pub async fn delete_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let article = find_article(&state, &slug).await?;
    ensure_owner("article", article.author_id, auth.user_id)?;

    if !ArticleRepo::delete(&state.pool, article.id).await? {
        return Err(article_not_found(&slug));
    }

    tracing::info!(article_id = article.id, slug = %slug, user_id = auth.user_id, "Article deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a slug to its article row, or 404.
pub(crate) async fn find_article(state: &AppState, slug: &str) -> AppResult<Article> {
    ArticleRepo::find_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| article_not_found(slug))
}

async fn load_detail(state: &AppState, id: DbId) -> AppResult<ArticleDetail> {
    ArticleRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))
}

fn article_not_found(slug: &str) -> AppError {
    AppError::Core(CoreError::NotFoundKey {
        entity: "Article",
        key: slug.to_string(),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
