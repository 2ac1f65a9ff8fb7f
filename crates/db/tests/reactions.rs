//! Integration tests for the reaction ledger.

use haven_core::reactions::{Presence, Vote};
use haven_db::models::article::{Article, NewArticle};
use haven_db::models::user::{CreateUser, User};
use haven_db::repositories::{ArticleRepo, ReactionRepo, UserRepo};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn seed_article(pool: &PgPool, author_id: i64) -> Article {
    ArticleRepo::create(
        pool,
        &NewArticle {
            author_id,
            title: "Reactive",
            description: "d",
            body: "b",
            image: "https://example.com/i.png",
            time_to_read: 1,
            tags: &[],
        },
    )
    .await
    .unwrap()
}

async fn reaction_rows(pool: &PgPool, user_id: i64, article_id: i64, kind: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM article_reactions
         WHERE user_id = $1 AND article_id = $2 AND kind = $3",
    )
    .bind(user_id)
    .bind(article_id)
    .bind(kind)
    .fetch_one(pool)
    .await
    .unwrap();
    count
}

async fn vote_value(pool: &PgPool, user_id: i64, article_id: i64) -> Option<i16> {
    sqlx::query_scalar(
        "SELECT value FROM article_reactions
         WHERE user_id = $1 AND article_id = $2 AND kind = 'vote'",
    )
    .bind(user_id)
    .bind(article_id)
    .fetch_optional(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_like_then_dislike_flips_single_row(pool: PgPool) {
    let user = seed_user(&pool, "jane").await;
    let article = seed_article(&pool, user.id).await;

    let liked = ReactionRepo::toggle_vote(&pool, user.id, article.id, Vote::Like)
        .await
        .unwrap();
    assert!(liked.applied);
    assert_eq!((liked.likes, liked.dislikes), (1, 0));

    let disliked = ReactionRepo::toggle_vote(&pool, user.id, article.id, Vote::Dislike)
        .await
        .unwrap();
    assert!(disliked.applied);
    assert_eq!((disliked.likes, disliked.dislikes), (0, 1));

    assert_eq!(reaction_rows(&pool, user.id, article.id, "vote").await, 1);
    assert_eq!(vote_value(&pool, user.id, article.id).await, Some(-1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeated_vote_withdraws(pool: PgPool) {
    let user = seed_user(&pool, "jane").await;
    let article = seed_article(&pool, user.id).await;

    ReactionRepo::toggle_vote(&pool, user.id, article.id, Vote::Like)
        .await
        .unwrap();
    let again = ReactionRepo::toggle_vote(&pool, user.id, article.id, Vote::Like)
        .await
        .unwrap();

    assert!(!again.applied);
    assert_eq!((again.likes, again.dislikes), (0, 0));
    assert_eq!(reaction_rows(&pool, user.id, article.id, "vote").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_identical_votes_cancel_out(pool: PgPool) {
    let user = seed_user(&pool, "jane").await;

    // No vote row exists before either toggle, so both race on an empty slot.
    for _ in 0..10 {
        let article = seed_article(&pool, user.id).await;

        let (first, second) = tokio::join!(
            ReactionRepo::toggle_vote(&pool, user.id, article.id, Vote::Like),
            ReactionRepo::toggle_vote(&pool, user.id, article.id, Vote::Like),
        );
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_ne!(first.applied, second.applied, "exactly one toggle applies");
        assert_eq!(vote_value(&pool, user.id, article.id).await, None);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_votes_from_different_users_accumulate(pool: PgPool) {
    let jane = seed_user(&pool, "jane").await;
    let john = seed_user(&pool, "johnny").await;
    let mary = seed_user(&pool, "maryann").await;
    let article = seed_article(&pool, jane.id).await;

    ReactionRepo::toggle_vote(&pool, jane.id, article.id, Vote::Like)
        .await
        .unwrap();
    ReactionRepo::toggle_vote(&pool, john.id, article.id, Vote::Like)
        .await
        .unwrap();
    let last = ReactionRepo::toggle_vote(&pool, mary.id, article.id, Vote::Dislike)
        .await
        .unwrap();
    assert_eq!((last.likes, last.dislikes), (2, 1));

    let detail = ArticleRepo::find_detail_by_id(&pool, article.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!((detail.likes, detail.dislikes), (2, 1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_double_bookmark_keeps_one_row(pool: PgPool) {
    let user = seed_user(&pool, "jane").await;
    let article = seed_article(&pool, user.id).await;

    assert!(ReactionRepo::add_presence(&pool, user.id, article.id, Presence::Bookmark)
        .await
        .unwrap());
    assert!(!ReactionRepo::add_presence(&pool, user.id, article.id, Presence::Bookmark)
        .await
        .unwrap());

    assert_eq!(reaction_rows(&pool, user.id, article.id, "bookmark").await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_remove_absent_presence_reports_false(pool: PgPool) {
    let user = seed_user(&pool, "jane").await;
    let article = seed_article(&pool, user.id).await;

    assert!(
        !ReactionRepo::remove_presence(&pool, user.id, article.id, Presence::Favorite)
            .await
            .unwrap()
    );

    ReactionRepo::add_presence(&pool, user.id, article.id, Presence::Favorite)
        .await
        .unwrap();
    assert_eq!(reaction_rows(&pool, user.id, article.id, "favorite").await, 1);
    assert!(
        ReactionRepo::remove_presence(&pool, user.id, article.id, Presence::Favorite)
            .await
            .unwrap()
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_kinds_are_independent(pool: PgPool) {
    let user = seed_user(&pool, "jane").await;
    let article = seed_article(&pool, user.id).await;

    ReactionRepo::add_presence(&pool, user.id, article.id, Presence::Favorite)
        .await
        .unwrap();
    ReactionRepo::add_presence(&pool, user.id, article.id, Presence::Bookmark)
        .await
        .unwrap();
    ReactionRepo::toggle_vote(&pool, user.id, article.id, Vote::Like)
        .await
        .unwrap();

    let favorites = ArticleRepo::list_reacted_by(&pool, user.id, Presence::Favorite, 10, 0)
        .await
        .unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].favorites_count, 1);

    let bookmarks = ArticleRepo::list_reacted_by(&pool, user.id, Presence::Bookmark, 10, 0)
        .await
        .unwrap();
    assert_eq!(bookmarks.len(), 1);
    assert_eq!(bookmarks[0].likes, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_check_constraint_rejects_bad_vote_value(pool: PgPool) {
    let user = seed_user(&pool, "jane").await;
    let article = seed_article(&pool, user.id).await;

    let result = sqlx::query(
        "INSERT INTO article_reactions (user_id, article_id, kind, value) VALUES ($1, $2, 'vote', 2)",
    )
    .bind(user.id)
    .bind(article.id)
    .execute(&pool)
    .await;
    assert!(result.is_err());
}
