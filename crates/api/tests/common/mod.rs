#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use risuspubl_core::store::memory::MemoryStore;
use tower::ServiceExt;

use risuspubl_api::config::ServerConfig;
use risuspubl_api::router::build_app_router;
use risuspubl_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 1,
    }
}

/// Build the full application router over `store`.
///
/// The store is shared, so several apps built from clones of one store see
/// the same data.
pub fn build_test_app(store: MemoryStore) -> Router {
    build_app_router(AppState::new(store, test_config()))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

/// Send a raw, unparsed body with a JSON content type.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create an editor through the API and return its id.
pub async fn create_editor(store: &MemoryStore) -> i64 {
    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/editors",
        serde_json::json!({"first_name": "Maxwell", "last_name": "Perkins", "salary": 85000}),
    )
    .await;
    body_json(response).await["editor_id"].as_i64().unwrap()
}

/// Create an author through the API and return its id.
pub async fn create_author(store: &MemoryStore, last_name: &str) -> i64 {
    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/authors",
        serde_json::json!({"first_name": "Pat", "last_name": last_name}),
    )
    .await;
    body_json(response).await["author_id"].as_i64().unwrap()
}
