//! Request and error types for the tuning API.

use crate::config::ResponseFormat;
use crate::hardware::HardwareError;
use crate::persist::PersistError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Query parameters accepted by `POST /tuning`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TuningQuery {
    /// `json`, `text` or `cnf`; overrides the Accept header
    pub format: Option<ResponseFormat>,
    /// Write the rendered cnf to the configured path
    pub persist: Option<bool>,
}

/// API error response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    fn new(message: &str, r#type: &str, code: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message: message.to_string(),
                r#type: r#type.to_string(),
                code: Some(code.to_string()),
            },
        }
    }

    /// Body could not be decoded into a hardware description (400).
    pub fn malformed_input() -> Self {
        Self::new("Invalid JSON data", "invalid_request_error", "malformed_input")
    }

    /// Memory size is not of the form `X GB` (400).
    pub fn invalid_memory_format(message: &str) -> Self {
        Self::new(message, "invalid_request_error", "invalid_memory_format")
    }

    /// Unusable query string or other request problem (400).
    pub fn bad_request(message: &str) -> Self {
        Self::new(message, "invalid_request_error", "invalid_request_error")
    }

    /// Rendered file could not be written (500). Details stay in the server log.
    pub fn persistence_failure() -> Self {
        Self::new(
            "Failed to save the configuration file",
            "server_error",
            "persistence_failure",
        )
    }

    /// Request body over the size limit (413).
    pub fn payload_too_large() -> Self {
        Self::new(
            "Request body is too large",
            "invalid_request_error",
            "payload_too_large",
        )
    }

    /// Request did not finish within the configured timeout (408).
    pub fn request_timeout() -> Self {
        Self::new("Request timed out", "server_error", "request_timeout")
    }

    /// Static label for metrics.
    pub fn code_label(&self) -> &'static str {
        match self.error.code.as_deref() {
            Some("malformed_input") => "malformed_input",
            Some("invalid_memory_format") => "invalid_memory_format",
            Some("invalid_request_error") => "invalid_request_error",
            Some("persistence_failure") => "persistence_failure",
            Some("payload_too_large") => "payload_too_large",
            Some("request_timeout") => "request_timeout",
            _ => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    fn status_code(&self) -> StatusCode {
        match self.error.code.as_deref() {
            Some("malformed_input") | Some("invalid_memory_format")
            | Some("invalid_request_error") => StatusCode::BAD_REQUEST,
            Some("payload_too_large") => StatusCode::PAYLOAD_TOO_LARGE,
            Some("request_timeout") => StatusCode::REQUEST_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<HardwareError> for ApiError {
    fn from(err: HardwareError) -> Self {
        match err {
            HardwareError::InvalidMemoryFormat { .. } => {
                ApiError::invalid_memory_format(&err.to_string())
            }
        }
    }
}

impl From<PersistError> for ApiError {
    fn from(err: PersistError) -> Self {
        tracing::error!(error = %err, "Failed to persist tuning file");
        ApiError::persistence_failure()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
