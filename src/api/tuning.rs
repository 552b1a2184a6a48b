//! Tuning endpoint handler.

use crate::api::{ApiError, AppState, TuningQuery};
use crate::config::ResponseFormat;
use crate::hardware::HardwareDescription;
use crate::logging::{generate_request_id, middleware::REQUEST_ID_HEADER};
use crate::persist::write_artifact;
use crate::tuning::{calculate, render_cnf, TuningParameters};
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn, Instrument};

/// POST /tuning - Calculate tuning parameters for the posted hardware.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TuningQuery>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let request_id = generate_request_id();
    let span = tracing::info_span!("tuning_request", request_id = %request_id);

    let query = query.map(|Query(q)| q);
    let format = match &query {
        Ok(q) => q
            .format
            .unwrap_or_else(|| negotiate(&headers, state.config.output.default_format)),
        Err(_) => state.config.output.default_format,
    };

    let result: Result<Response, ApiError> = async {
        let query = query.map_err(|rejection| {
            warn!(error = %rejection, "Rejected query string");
            ApiError::bad_request(&rejection.body_text())
        })?;
        respond(&state, &query, format, &body).await
    }
    .instrument(span)
    .await;

    let mut response = match result {
        Ok(response) => {
            state
                .metrics
                .record_request(format.as_str(), "success", start_time.elapsed());
            response
        }
        Err(error) => {
            state
                .metrics
                .record_request(format.as_str(), "error", start_time.elapsed());
            state.metrics.record_error(error.code_label());
            error.into_response()
        }
    };

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

async fn respond(
    state: &AppState,
    query: &TuningQuery,
    format: ResponseFormat,
    body: &[u8],
) -> Result<Response, ApiError> {
    let hardware: HardwareDescription = serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Invalid JSON data");
        ApiError::malformed_input()
    })?;

    let params = calculate(&hardware, &state.defaults).map_err(|e| {
        warn!(memory_gb = ?hardware.memory_gb, "Invalid memory format");
        ApiError::from(e)
    })?;

    let text = render_cnf(&params);

    let persist = query.persist.unwrap_or(state.config.output.persist);
    if persist {
        let path = state.config.output.path.clone();
        let contents = text.clone();
        tokio::task::spawn_blocking(move || write_artifact(&path, contents.as_bytes()))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Persistence task failed");
                ApiError::persistence_failure()
            })??;
    }

    info!(
        max_connections = params.max_connections,
        innodb_buffer_pool_size = %params.innodb_buffer_pool_size,
        cpus = hardware.cpus,
        db_type = %hardware.db_type,
        format = format.as_str(),
        persisted = persist,
        "Tuning parameters calculated"
    );

    Ok(render_response(format, params, text))
}

fn render_response(format: ResponseFormat, params: TuningParameters, text: String) -> Response {
    match format {
        ResponseFormat::Json => Json(params).into_response(),
        ResponseFormat::Text => (
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            text,
        )
            .into_response(),
    }
}

/// Pick a response format from the Accept header.
pub(crate) fn negotiate(headers: &HeaderMap, fallback: ResponseFormat) -> ResponseFormat {
    let accept = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if accept.contains("application/json") {
        ResponseFormat::Json
    } else if accept.contains("text/plain") {
        ResponseFormat::Text
    } else {
        fallback
    }
}
