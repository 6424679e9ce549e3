use crate::api::responses::{
    DataEnvelope, EchoResponse, Endpoints, IndexResponse, InvalidateResponse,
};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::info;

/// GET /api
pub async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    let info = state.health_service.info();

    Json(IndexResponse {
        message: format!("Welcome to {} API", info.display_name),
        version: info.version.clone(),
        endpoints: Endpoints {
            health: "/health",
            api: "/api",
            metrics: "/metrics",
        },
    })
}

/// GET /api/data
pub async fn get_data(State(state): State<AppState>) -> Json<DataEnvelope> {
    let response = state.data_service.get_data().await;
    state.metrics.record_data_source(response.source);

    Json(response.into())
}

/// DELETE /api/data
pub async fn invalidate_data(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let deleted = state.data_service.invalidate().await;
    info!("Sample data invalidation requested (deleted={})", deleted);

    Json(InvalidateResponse { deleted })
}

/// POST /api/echo
pub async fn echo(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<EchoResponse>, ApiError> {
    let Json(data) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    info!("Echo request received: {}", data);

    Ok(Json(EchoResponse {
        echo: data,
        message: "Data received successfully",
    }))
}
