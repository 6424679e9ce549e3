use serde::Serialize;
use serde_json::Value;
use showcase::domain::Dataset;
use showcase::domain::response::{DataResponse, HealthCheckResult, HealthStatus, Liveness};
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl From<HealthStatus> for HealthResponse {
    fn from(status: HealthStatus) -> Self {
        Self {
            status: status.status.to_string(),
            service: status.service,
            version: status.version,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: BTreeMap<String, bool>,
}

impl From<HealthCheckResult> for ReadinessResponse {
    fn from(result: HealthCheckResult) -> Self {
        Self {
            ready: result.ready,
            checks: result.checks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub alive: bool,
}

impl From<Liveness> for LivenessResponse {
    fn from(liveness: Liveness) -> Self {
        Self {
            alive: liveness.alive,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub api: &'static str,
    pub metrics: &'static str,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub version: String,
    pub endpoints: Endpoints,
}

// === Data Models ===

#[derive(Debug, Serialize)]
pub struct DataEnvelope {
    pub data: Dataset,
    pub source: &'static str,
}

impl From<DataResponse> for DataEnvelope {
    fn from(response: DataResponse) -> Self {
        Self {
            data: response.data,
            source: response.source.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct EchoResponse {
    pub echo: Value,
    pub message: &'static str,
}

// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
