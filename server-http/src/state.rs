use crate::metrics::HttpMetrics;
use shared::config::Config;
use showcase::domain::ServiceInfo;
use showcase::{CacheClient, HealthService, ReadThroughService};
use std::sync::Arc;
use storage_engine::UnifiedStoreFactory;

/// Server state shared across handlers
///
/// One instance per process; every service is handed in here rather than
/// living in a global.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheClient>,
    pub data_service: Arc<ReadThroughService>,
    pub health_service: Arc<HealthService>,
    pub metrics: Arc<HttpMetrics>,
}

impl AppState {
    pub fn new(cache: Arc<CacheClient>, config: &Config, metrics: Arc<HttpMetrics>) -> Self {
        let info = ServiceInfo::new(
            config.service_name.clone(),
            config.app_name.clone(),
            env!("CARGO_PKG_VERSION"),
        );

        let data_service = Arc::new(ReadThroughService::new(
            cache.clone(),
            config.cache.default_ttl,
        ));
        let health_service = Arc::new(HealthService::new(cache.clone(), info));

        Self {
            cache,
            data_service,
            health_service,
            metrics,
        }
    }

    /// Connect the configured cache backend and wire every service.
    /// An unreachable backend leaves the cache disconnected, not an error.
    pub async fn from_config(config: &Config) -> Result<Self, prometheus::Error> {
        let cache = Arc::new(CacheClient::connect(&UnifiedStoreFactory, &config.cache).await);

        if !cache.is_connected() {
            tracing::warn!("Cache unavailable. Serving uncached data.");
        }

        let metrics = Arc::new(HttpMetrics::new()?);
        Ok(Self::new(cache, config, metrics))
    }
}
