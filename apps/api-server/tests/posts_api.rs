//! Integration tests for the /posts resource over the in-memory store.

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use api_server::AppState;
use blog_core::ports::{BaseRepository, PostRepository};
use common::seed_posts;

const SEED_COUNT: usize = 10;

async fn seeded_state() -> AppState {
    let state = AppState::in_memory();
    seed_posts(state.posts.as_ref(), SEED_COUNT).await;
    state
}

#[actix_web::test]
async fn test_list_returns_every_post() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Vec<Value> = test::read_body_json(resp).await;
    let count = state.posts.count().await.unwrap();
    assert_eq!(body.len() as u64, count);
    assert_eq!(body.len(), SEED_COUNT);

    for post in &body {
        for key in ["id", "author", "title", "content", "created"] {
            assert!(post.get(key).is_some(), "missing key {key} in {post}");
        }
    }
}

#[actix_web::test]
async fn test_list_author_is_formatted_name() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/posts").to_request();
    let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;

    for view in &body {
        let id = uuid::Uuid::parse_str(view["id"].as_str().unwrap()).unwrap();
        let stored = state.posts.find_by_id(id).await.unwrap().unwrap();

        let author = view["author"].as_str().unwrap();
        assert!(author.contains(&stored.author.first_name));
        assert!(author.contains(&stored.author.last_name));
        assert_eq!(view["title"], stored.title);
        assert_eq!(view["content"], stored.content);
    }
}

#[actix_web::test]
async fn test_list_is_stable_without_writes() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let first: Vec<Value> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/posts").to_request()).await;
    let second: Vec<Value> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/posts").to_request()).await;

    assert_eq!(first, second);
}

#[actix_web::test]
async fn test_list_empty_store() {
    let state = AppState::in_memory();
    let app = init_app!(state);

    let body: Vec<Value> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/posts").to_request()).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn test_create_post_round_trip() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({
            "author": {"firstName": "A", "lastName": "B"},
            "title": "T",
            "content": "C"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["author"], "A B");
    assert_eq!(body["title"], "T");
    assert_eq!(body["content"], "C");
    assert!(body["created"].is_string());

    let id = uuid::Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
    let stored = state.posts.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.author.first_name, "A");
    assert_eq!(stored.author.last_name, "B");
    assert_eq!(stored.title, "T");
    assert_eq!(stored.content, "C");
    assert_eq!(state.posts.count().await.unwrap(), SEED_COUNT as u64 + 1);
}

#[actix_web::test]
async fn test_create_accepts_empty_content() {
    let state = AppState::in_memory();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({
            "author": {"firstName": "A", "lastName": "B"},
            "title": "T",
            "content": ""
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_create_missing_title_is_rejected() {
    let state = seeded_state().await;
    let app = init_app!(state);
    let before = state.posts.count().await.unwrap();

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({
            "author": {"firstName": "A", "lastName": "B"},
            "content": "C"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("title"));
    assert_eq!(state.posts.count().await.unwrap(), before);
}

#[actix_web::test]
async fn test_create_partial_author_is_rejected() {
    let state = AppState::in_memory();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({
            "author": {"firstName": "A"},
            "title": "T",
            "content": "C"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("author.lastName"));
    assert_eq!(state.posts.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_create_rejects_each_missing_required_field() {
    let state = seeded_state().await;
    let app = init_app!(state);
    let before = state.posts.count().await.unwrap();

    let cases = [
        (
            "content",
            json!({"author": {"firstName": "A", "lastName": "B"}, "title": "T"}),
        ),
        ("author", json!({"title": "T", "content": "C"})),
        (
            "title",
            json!({"author": {"firstName": "A", "lastName": "B"}, "title": "  ", "content": "C"}),
        ),
    ];

    for (field, payload) in cases {
        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "field {field}");

        let body: Value = test::read_body_json(resp).await;
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.contains(field), "detail {detail:?} should name {field}");
        assert_eq!(state.posts.count().await.unwrap(), before);
    }
}

#[actix_web::test]
async fn test_create_malformed_json_is_bad_request() {
    let state = AppState::in_memory();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"title\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_update_post() {
    let state = seeded_state().await;
    let app = init_app!(state);
    let existing = state.posts.find_one().await.unwrap().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", existing.id))
        .set_json(json!({
            "id": existing.id.to_string(),
            "author": {"firstName": "James", "lastName": "Cooper"},
            "title": "The Last of the Mohicans",
            "content": "This book is a historical account."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let updated = state.posts.find_by_id(existing.id).await.unwrap().unwrap();
    assert_eq!(updated.author.first_name, "James");
    assert_eq!(updated.author.last_name, "Cooper");
    assert_eq!(updated.title, "The Last of the Mohicans");
    assert_eq!(updated.content, "This book is a historical account.");
    assert_eq!(updated.id, existing.id);
    assert_eq!(updated.created, existing.created);
}

#[actix_web::test]
async fn test_update_keeps_unsupplied_fields() {
    let state = seeded_state().await;
    let app = init_app!(state);
    let existing = state.posts.find_one().await.unwrap().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", existing.id))
        .set_json(json!({"title": "Only the title"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let updated = state.posts.find_by_id(existing.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Only the title");
    assert_eq!(updated.author, existing.author);
    assert_eq!(updated.content, existing.content);
}

#[actix_web::test]
async fn test_update_id_mismatch_is_rejected() {
    let state = seeded_state().await;
    let app = init_app!(state);
    let existing = state.posts.find_one().await.unwrap().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", existing.id))
        .set_json(json!({
            "id": uuid::Uuid::new_v4().to_string(),
            "title": "Hijacked"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let unchanged = state.posts.find_by_id(existing.id).await.unwrap().unwrap();
    assert_eq!(unchanged, existing);
}

#[actix_web::test]
async fn test_update_missing_post_is_store_error() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", uuid::Uuid::new_v4()))
        .set_json(json!({"title": "Nobody home"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("detail").is_none());
}

#[actix_web::test]
async fn test_delete_post() {
    let state = seeded_state().await;
    let app = init_app!(state);
    let existing = state.posts.find_one().await.unwrap().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{}", existing.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    assert!(state.posts.find_by_id(existing.id).await.unwrap().is_none());
    assert_eq!(state.posts.count().await.unwrap(), SEED_COUNT as u64 - 1);
}

#[actix_web::test]
async fn test_delete_missing_post_still_succeeds() {
    let state = seeded_state().await;
    let app = init_app!(state);

    for uri in [format!("/posts/{}", uuid::Uuid::new_v4()), "/posts/not-an-id".to_string()] {
        let req = test::TestRequest::delete().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    assert_eq!(state.posts.count().await.unwrap(), SEED_COUNT as u64);
}

#[actix_web::test]
async fn test_request_id_is_echoed() {
    let state = AppState::in_memory();
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/posts")
        .insert_header(("x-request-id", "abc-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.headers().get("x-request-id").unwrap(), "abc-123");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let state = AppState::in_memory();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/authors").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health_reports_post_count() {
    let state = seeded_state().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["posts"], SEED_COUNT as u64);
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
}
