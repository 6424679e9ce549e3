pub mod api;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

// Re-export key types
pub use routes::{app, build_router};
pub use state::AppState;
