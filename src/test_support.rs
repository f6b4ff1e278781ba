//! Shared fixtures for handler tests: the full router over a memory store.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tower::ServiceExt;

use crate::app;
use crate::state::AppState;
use crate::store::{MemoryStore, StoreClient};

pub fn setup_test_app() -> (Router, StoreClient) {
    let store = StoreClient::new(MemoryStore::new());
    let state = AppState {
        store: store.clone(),
    };

    (app::router(state), store)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn body_json<T: DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// POST a pet and return the created body, asserting the request succeeded
pub async fn create_pet(app: &Router, name: &str, category: &str) -> JsonValue {
    let payload = serde_json::json!({"name": name, "category": category}).to_string();
    let response = send(app, "POST", "/pets", Some(&payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
