use async_trait::async_trait;
use shared::Result;
use shared::config::{CacheSettings, StoreKind};
use showcase::ports::{KeyValueStore, StoreFactory};
use std::sync::Arc;
use tracing::info;

pub mod moka_store;
pub mod redis_store;

pub use moka_store::MokaStore;
pub use redis_store::RedisStore;

/// Opens whichever backend the settings select
#[derive(Clone, Copy, Debug, Default)]
pub struct UnifiedStoreFactory;

#[async_trait]
impl StoreFactory for UnifiedStoreFactory {
    async fn connect(&self, settings: &CacheSettings) -> Result<Arc<dyn KeyValueStore>> {
        match settings.backend {
            StoreKind::Redis => {
                info!("Connecting to redis at {}", settings.redis_url());
                Ok(Arc::new(RedisStore::connect(settings).await?))
            }
            StoreKind::Memory => {
                info!(
                    "Using in-memory cache (capacity {} entries)",
                    settings.memory_capacity
                );
                Ok(Arc::new(MokaStore::new(
                    "showcase",
                    Some(settings.memory_capacity),
                )))
            }
        }
    }
}
