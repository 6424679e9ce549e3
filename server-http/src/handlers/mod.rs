pub mod api;
pub mod health;
pub mod metrics;

pub use api::{echo, get_data, index, invalidate_data};
pub use health::{health_check, liveness_check, readiness_check};
pub use metrics::metrics;
