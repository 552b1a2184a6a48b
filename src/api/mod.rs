//! # Tuning API
//!
//! HTTP transport in front of the tuning calculator.
//!
//! ## Endpoints
//!
//! - `POST /tuning` - Hardware description in, tuning parameters out
//! - `GET /health` - Liveness and uptime
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Example
//!
//! ```no_run
//! use tuning_db::api::{AppState, create_router};
//! use tuning_db::config::TuningDbConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(TuningDbConfig::default());
//! let state = Arc::new(AppState::new(config));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors carry a JSON envelope and no partial result:
//! ```json
//! {
//!   "error": {
//!     "message": "field 'memory_gb' should be specified in GB, like 'X GB'. Example '1 GB'",
//!     "type": "invalid_request_error",
//!     "code": "invalid_memory_format"
//!   }
//! }
//! ```

mod health;
mod rejection;
mod tuning;
pub mod types;

pub use types::*;

use crate::config::TuningDbConfig;
use crate::metrics::MetricsCollector;
use crate::tuning::TuningDefaults;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (64 KiB); a hardware description is a few dozen bytes.
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<TuningDbConfig>,
    /// Constant table, fixed for the life of the process
    pub defaults: Arc<TuningDefaults>,
    pub start_time: Instant,
    pub metrics: Arc<MetricsCollector>,
}

impl AppState {
    /// Create new application state from a validated configuration.
    pub fn new(config: Arc<TuningDbConfig>) -> Self {
        let start_time = Instant::now();
        let defaults = Arc::new(config.tuning.clone());
        let metrics = Arc::new(MetricsCollector::install_or_detached());

        Self {
            config,
            defaults,
            start_time,
            metrics,
        }
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .route("/tuning", post(tuning::handle))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::new(timeout))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rejection::envelope_transport_errors,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
