//! # Metrics Collection Module
//!
//! Request counters and latency histogram, exported in Prometheus text
//! format on `GET /metrics`.
//!
//! **Counters:**
//! - `tuning_requests_total{format, status}` - Tuning requests by outcome
//! - `tuning_errors_total{error_type}` - Failed requests by error kind
//!
//! **Histograms:**
//! - `tuning_request_duration_seconds` - Handler latency

pub mod handler;

// Re-export PrometheusBuilder for test compatibility
pub use metrics_exporter_prometheus::PrometheusBuilder;

use metrics_exporter_prometheus::PrometheusHandle;
use std::time::Duration;

pub const REQUESTS_TOTAL: &str = "tuning_requests_total";
pub const ERRORS_TOTAL: &str = "tuning_errors_total";
pub const REQUEST_DURATION_SECONDS: &str = "tuning_request_duration_seconds";

/// Records tuning metrics and renders them through its Prometheus handle.
pub struct MetricsCollector {
    prometheus_handle: PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(prometheus_handle: PrometheusHandle) -> Self {
        Self { prometheus_handle }
    }

    /// Collector backed by the global recorder, or a detached one if a
    /// recorder is already installed (several routers in one test binary).
    pub fn install_or_detached() -> Self {
        let handle = setup_metrics().unwrap_or_else(|e| {
            tracing::debug!("Metrics already initialized, creating new handle: {}", e);
            PrometheusBuilder::new().build_recorder().handle()
        });
        Self::new(handle)
    }

    /// Count a finished tuning request.
    pub fn record_request(&self, format: &'static str, status: &'static str, elapsed: Duration) {
        metrics::counter!(REQUESTS_TOTAL, "format" => format, "status" => status).increment(1);
        metrics::histogram!(REQUEST_DURATION_SECONDS).record(elapsed.as_secs_f64());
    }

    /// Count a failed tuning request by error code.
    pub fn record_error(&self, error_type: &'static str) {
        metrics::counter!(ERRORS_TOTAL, "error_type" => error_type).increment(1);
    }

    /// Prometheus text exposition of all recorded metrics.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// Install the global Prometheus recorder.
///
/// Buckets are sized for a sub-millisecond calculation plus optional disk write.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let duration_buckets = &[0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.5, 1.0];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION_SECONDS.to_string()),
            duration_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}
