//! HTTP-level integration tests for comment threads and edit history.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_article, delete_auth, get, post_json_auth, put_json_auth, register};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn comment(pool: &PgPool, token: &str, slug: &str, body: Value) -> (StatusCode, Value) {
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/articles/{slug}/comments"),
        token,
        body,
    )
    .await;
    let status = response.status();
    (status, body_json(response).await)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_top_level_comment_and_reply(pool: PgPool) {
    let (_, token) = register(common::build_test_app(pool.clone()), "jane").await;
    let slug = create_article(common::build_test_app(pool.clone()), &token, "Threads", json!([])).await;

    let (status, top) = comment(&pool, &token, &slug, json!({ "text": "first" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(top["data"]["parent_id"], Value::Null);
    assert_eq!(top["data"]["author_username"], "jane");
    let top_id = top["data"]["id"].as_i64().unwrap();

    let (status, _) = comment(&pool, &token, &slug, json!({ "parent": 0, "text": "second" })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, reply) =
        comment(&pool, &token, &slug, json!({ "parent": top_id, "text": "a reply" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(reply["data"]["parent_id"], top_id);

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/articles/{slug}/comments"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let listed = json["data"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["text"], "first");
    assert_eq!(listed[0]["reply_count"], 1);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/articles/{slug}/comments/{top_id}/replies"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["text"], "a reply");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reply_to_reply_is_rejected(pool: PgPool) {
    let (_, token) = register(common::build_test_app(pool.clone()), "jane").await;
    let slug = create_article(common::build_test_app(pool.clone()), &token, "Threads", json!([])).await;

    let (_, top) = comment(&pool, &token, &slug, json!({ "text": "top" })).await;
    let top_id = top["data"]["id"].as_i64().unwrap();
    let (_, reply) = comment(&pool, &token, &slug, json!({ "parent": top_id, "text": "reply" })).await;
    let reply_id = reply["data"]["id"].as_i64().unwrap();

    let (status, json) =
        comment(&pool, &token, &slug, json!({ "parent": reply_id, "text": "nested" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_parent_on_another_article_is_not_found(pool: PgPool) {
    let (_, token) = register(common::build_test_app(pool.clone()), "jane").await;
    let first = create_article(common::build_test_app(pool.clone()), &token, "First", json!([])).await;
    let second = create_article(common::build_test_app(pool.clone()), &token, "Second", json!([])).await;

    let (_, top) = comment(&pool, &token, &first, json!({ "text": "on first" })).await;
    let top_id = top["data"]["id"].as_i64().unwrap();

    let (status, _) =
        comment(&pool, &token, &second, json!({ "parent": top_id, "text": "misplaced" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        comment(&pool, &token, &second, json!({ "parent": 999_999, "text": "orphan" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Reading the comment through the wrong article is not found either.
    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/articles/{second}/comments/{top_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_comment_is_rejected(pool: PgPool) {
    let (_, token) = register(common::build_test_app(pool.clone()), "jane").await;
    let slug = create_article(common::build_test_app(pool.clone()), &token, "Threads", json!([])).await;

    let (status, _) = comment(&pool, &token, &slug, json!({ "text": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_edits_are_kept_in_history(pool: PgPool) {
    let (_, token) = register(common::build_test_app(pool.clone()), "jane").await;
    let slug = create_article(common::build_test_app(pool.clone()), &token, "Threads", json!([])).await;

    let (_, created) = comment(&pool, &token, &slug, json!({ "text": "v1" })).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/articles/{slug}/comments/{id}");

    for text in ["v2", "v3"] {
        let response = put_json_auth(
            common::build_test_app(pool.clone()),
            &uri,
            &token,
            json!({ "text": text }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["text"], text);
    }

    let response = get(common::build_test_app(pool), &format!("{uri}/history")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["comment_id"], id);
    assert_eq!(json["data"]["current"], "v3");
    let history: Vec<&str> = json["data"]["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["text"].as_str().unwrap())
        .collect();
    assert_eq!(history, vec!["v1", "v2"]);
    assert_eq!(json["data"]["versions"], json!(["v1", "v2", "v3"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_author_may_edit_or_delete(pool: PgPool) {
    let (_, jane) = register(common::build_test_app(pool.clone()), "jane").await;
    let (_, john) = register(common::build_test_app(pool.clone()), "johnny").await;
    let slug = create_article(common::build_test_app(pool.clone()), &jane, "Threads", json!([])).await;

    let (_, created) = comment(&pool, &jane, &slug, json!({ "text": "mine" })).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/articles/{slug}/comments/{id}");

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        &john,
        json!({ "text": "hijacked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &john).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // No history was recorded by the rejected edit.
    let response = get(common::build_test_app(pool), &format!("{uri}/history")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["current"], "mine");
    assert_eq!(json["data"]["history"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_top_level_comment_removes_replies(pool: PgPool) {
    let (_, token) = register(common::build_test_app(pool.clone()), "jane").await;
    let slug = create_article(common::build_test_app(pool.clone()), &token, "Threads", json!([])).await;

    let (_, top) = comment(&pool, &token, &slug, json!({ "text": "top" })).await;
    let top_id = top["data"]["id"].as_i64().unwrap();
    let (_, reply) = comment(&pool, &token, &slug, json!({ "parent": top_id, "text": "reply" })).await;
    let reply_id = reply["data"]["id"].as_i64().unwrap();

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/articles/{slug}/comments/{top_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/articles/{slug}/comments/{reply_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
