use crate::handlers;
use crate::middleware::track_metrics;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use tower::Layer;

/// Build and configure the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health checks
        .route("/health", get(handlers::health_check))
        .route("/health/ready", get(handlers::readiness_check))
        .route("/health/live", get(handlers::liveness_check))
        // API routes
        .route("/api", get(handlers::index))
        .route(
            "/api/data",
            get(handlers::get_data).delete(handlers::invalidate_data),
        )
        .route("/api/echo", post(handlers::echo))
        // Prometheus scrape endpoint
        .route("/metrics", get(handlers::metrics))
        // Middleware
        .route_layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            track_metrics,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The router wrapped so trailing slashes are trimmed before routing
pub fn app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
