use crate::domain::response::{HealthCheckResult, HealthStatus, Liveness};
use crate::domain::{CACHE_CHECK, ServiceInfo};
use crate::planes::data::cache_client::CacheClient;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// Answers liveness and readiness probes
#[derive(Clone, Debug)]
pub struct HealthService {
    cache: Arc<CacheClient>,
    info: ServiceInfo,
}

impl HealthService {
    pub fn new(cache: Arc<CacheClient>, info: ServiceInfo) -> Self {
        Self { cache, info }
    }

    pub fn info(&self) -> &ServiceInfo {
        &self.info
    }

    /// Basic status; no dependency is consulted
    pub fn status(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy",
            service: self.info.name.clone(),
            version: self.info.version.clone(),
        }
    }

    /// The process is running; independent of any external dependency
    pub fn liveness(&self) -> Liveness {
        Liveness { alive: true }
    }

    /// Whether every dependency is currently reachable
    pub async fn readiness(&self) -> HealthCheckResult {
        let mut checks = BTreeMap::new();
        checks.insert(CACHE_CHECK.to_string(), self.cache.check_connection().await);

        let result = HealthCheckResult::from_checks(checks);
        if !result.ready {
            warn!("Readiness check failed: {:?}", result.checks);
        }
        result
    }
}
