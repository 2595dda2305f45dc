// tests/router_tests.rs

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use post_feed::{
    config::Config, engine, models::post::Draft, routes, state::AppState,
    store::{MemoryPostStore, PostStore}, utils::jwt::sign_jwt,
};
use tower::ServiceExt;

const SECRET: &str = "router_test_secret";

fn test_config() -> Config {
    Config {
        database_url: None,
        jwt_secret: SECRET.to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        port: 0,
    }
}

fn app_with(store: Arc<MemoryPostStore>) -> axum::Router {
    routes::create_router(AppState {
        store,
        config: test_config(),
    })
}

fn authed(method: &str, uri: &str, user: &str) -> Request<Body> {
    let token = sign_jwt(user, &test_config()).unwrap();
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn unknown_path_is_404() {
    let app = app_with(Arc::new(MemoryPostStore::new()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/random_path_that_does_not_exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let store = Arc::new(MemoryPostStore::new());
    let post = engine::create_post("u1", Draft::new("hello")).unwrap();
    store.insert(&post).await.unwrap();

    let claims = serde_json::json!({ "sub": "u2", "exp": 1 });
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let response = app_with(store.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/posts/like/{}", post.id))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(store.find(post.id).await.unwrap().unwrap().likes.is_empty());
}

#[tokio::test]
async fn like_is_persisted_through_the_store() {
    let store = Arc::new(MemoryPostStore::new());
    let post = engine::create_post("u1", Draft::new("hello")).unwrap();
    store.insert(&post).await.unwrap();

    let response = app_with(store.clone())
        .oneshot(authed("POST", &format!("/api/posts/like/{}", post.id), "u2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stored = store.find(post.id).await.unwrap().unwrap();
    assert!(stored.is_liked_by("u2"));
}

#[tokio::test]
async fn malformed_comment_id_is_404() {
    let store = Arc::new(MemoryPostStore::new());
    let post = engine::create_post("u1", Draft::new("hello")).unwrap();
    store.insert(&post).await.unwrap();

    let response = app_with(store)
        .oneshot(authed(
            "DELETE",
            &format!("/api/posts/comment/{}/nope", post.id),
            "u2",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
