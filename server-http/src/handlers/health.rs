use crate::api::responses::{HealthResponse, LivenessResponse, ReadinessResponse};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.health_service.status().into())
}

/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let result = state.health_service.readiness().await;

    let status = if result.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(result.into()))
}

/// GET /health/live
pub async fn liveness_check(State(state): State<AppState>) -> Json<LivenessResponse> {
    Json(state.health_service.liveness().into())
}
