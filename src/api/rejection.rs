//! Rewrites body-limit and timeout rejections into the API error envelope.

use crate::api::{ApiError, AppState};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Middleware sitting outside the body-limit and timeout layers.
pub(crate) async fn envelope_transport_errors(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    let error = match response.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::payload_too_large(),
        StatusCode::REQUEST_TIMEOUT => ApiError::request_timeout(),
        _ => return response,
    };

    tracing::warn!(status = %response.status(), code = error.code_label(), "Request rejected");
    state.metrics.record_error(error.code_label());
    error.into_response()
}
