//! Shared test utilities for tuning-db integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use std::sync::Arc;
use tower::Service;
use tuning_db::api::{create_router, AppState};
use tuning_db::config::TuningDbConfig;

/// Create a router over the given configuration.
pub fn make_app_with_config(config: TuningDbConfig) -> axum::Router {
    let state = Arc::new(AppState::new(Arc::new(config)));
    create_router(state)
}

/// Create a router over the default configuration.
pub fn make_app() -> axum::Router {
    make_app_with_config(TuningDbConfig::default())
}

/// Build a `POST /tuning` request with a raw body.
pub fn tuning_request(uri: &str, accept: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(accept) = accept {
        builder = builder.header("accept", accept);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Send a request and return status, headers and body text.
pub async fn send(app: &mut axum::Router, request: Request<Body>) -> (Response<()>, String) {
    let response = app.call(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    (
        Response::from_parts(parts, ()),
        String::from_utf8(bytes.to_vec()).unwrap(),
    )
}

/// Send a request and decode the JSON body.
pub async fn send_json(
    app: &mut axum::Router,
    request: Request<Body>,
) -> (Response<()>, serde_json::Value) {
    let (response, body) = send(app, request).await;
    let value = serde_json::from_str(&body).unwrap();
    (response, value)
}
