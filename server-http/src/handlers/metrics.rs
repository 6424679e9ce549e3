use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, http::header, response::IntoResponse};

/// GET /metrics
///
/// Prometheus text exposition format.
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state.metrics.render()?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    ))
}
