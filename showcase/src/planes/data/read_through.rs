use crate::domain::response::DataResponse;
use crate::domain::{Dataset, SAMPLE_DATA_KEY, Source};
use crate::planes::data::cache_client::CacheClient;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::TtlSecs;
use std::sync::Arc;
use tracing::{info, warn};

/// Serves the sample dataset through the cache: check cache, else compute,
/// else populate the cache.
///
/// There is no single-flight collapsing. Concurrent misses each recompute and
/// write; computation must be idempotent.
#[derive(Clone, Debug)]
pub struct ReadThroughService {
    cache: Arc<CacheClient>,
    ttl: TtlSecs,
}

impl ReadThroughService {
    pub fn new(cache: Arc<CacheClient>, ttl: TtlSecs) -> Self {
        Self { cache, ttl }
    }

    pub fn ttl(&self) -> TtlSecs {
        self.ttl
    }

    /// Return the cached value for `key`, or compute and cache it.
    /// A failed cache write is logged; the computed value is still returned.
    pub async fn get_or_compute<T, F>(&self, key: &str, compute: F) -> (T, Source)
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        if let Some(cached) = self.cache.get::<T>(key).await {
            info!("Cache hit for {}", key);
            return (cached, Source::Cache);
        }

        info!("Cache miss for {}, generating new data", key);
        let value = compute();

        if !self.cache.set(key, &value, self.ttl).await {
            warn!("Could not cache {}; serving freshly computed value", key);
        }

        (value, Source::Computed)
    }

    pub async fn get_data(&self) -> DataResponse {
        let (data, source) = self
            .get_or_compute(SAMPLE_DATA_KEY, Dataset::sample)
            .await;
        DataResponse::new(data, source)
    }

    /// Drop the cached dataset so the next read recomputes it
    pub async fn invalidate(&self) -> bool {
        self.cache.delete(SAMPLE_DATA_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingStore, MemoryStore};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service_with_store() -> (ReadThroughService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let cache = Arc::new(CacheClient::new(store.clone()));
        (ReadThroughService::new(cache, TtlSecs(300)), store)
    }

    #[tokio::test]
    async fn test_miss_then_hit_then_invalidate() {
        let (service, _) = service_with_store();

        let first = service.get_data().await;
        assert_eq!(first.source, Source::Computed);
        assert_eq!(first.data.items.len(), 3);

        let second = service.get_data().await;
        assert_eq!(second.source, Source::Cache);
        assert_eq!(second.data, first.data);

        assert!(service.invalidate().await);

        let third = service.get_data().await;
        assert_eq!(third.source, Source::Computed);
        assert_eq!(third.data, first.data);
    }

    #[tokio::test]
    async fn test_compute_runs_only_on_miss() {
        let (service, store) = service_with_store();
        let computed = AtomicUsize::new(0);

        for _ in 0..3 {
            let (value, _) = service
                .get_or_compute("counter", || {
                    computed.fetch_add(1, Ordering::SeqCst);
                    vec![1, 2, 3]
                })
                .await;
            assert_eq!(value, vec![1, 2, 3]);
        }

        assert_eq!(computed.load(Ordering::SeqCst), 1);
        assert_eq!(store.sets.load(Ordering::SeqCst), 1);
        // One miss then two hits, each a single backend lookup
        assert_eq!(store.gets.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_write_failure_still_serves_computed_data() {
        let cache = Arc::new(CacheClient::new(Arc::new(FailingStore)));
        let service = ReadThroughService::new(cache, TtlSecs(300));

        for _ in 0..2 {
            let response = service.get_data().await;
            assert_eq!(response.source, Source::Computed);
            assert_eq!(response.data, Dataset::sample());
        }
    }

    #[tokio::test]
    async fn test_disconnected_cache_always_computes() {
        let service = ReadThroughService::new(Arc::new(CacheClient::disconnected()), TtlSecs(300));

        assert_eq!(service.get_data().await.source, Source::Computed);
        assert_eq!(service.get_data().await.source, Source::Computed);
        assert!(!service.invalidate().await);
    }

    #[tokio::test]
    async fn test_entry_is_written_with_configured_ttl() {
        let store = Arc::new(MemoryStore::default());
        let cache = Arc::new(CacheClient::new(store.clone()));
        let service = ReadThroughService::new(cache, TtlSecs(1));

        assert_eq!(service.get_data().await.source, Source::Computed);
        assert_eq!(service.get_data().await.source, Source::Cache);

        tokio::time::sleep(std::time::Duration::from_millis(1_100)).await;

        assert_eq!(service.get_data().await.source, Source::Computed);
    }

    #[tokio::test]
    async fn test_concurrent_misses_are_all_served() {
        let (service, _) = service_with_store();

        let readers: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.get_data().await })
            })
            .collect();

        for reader in readers {
            let response = reader.await.unwrap();
            assert_eq!(response.data, Dataset::sample());
        }
        assert_eq!(service.get_data().await.source, Source::Cache);
    }
}
