#![deny(clippy::all)]

use async_trait::async_trait;
use shared::config::CacheSettings;
use shared::{Result, TtlSecs};
use std::sync::Arc;

// Ports are the pluggable extension points for the key-value backends

/// Port for opening a connection to a backend from configuration
/// This allows different storage backends to be plugged in
#[async_trait]
pub trait StoreFactory: Send + Sync + 'static {
    /// Establish a connection; failures are reported, never retried here
    async fn connect(&self, settings: &CacheSettings) -> Result<Arc<dyn KeyValueStore>>;
}

/// Port for raw TTL key-value access (e.g., Redis)
///
/// Values cross this boundary as UTF-8 text. Expiry is the backend's job.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    /// Unconditionally overwrites any existing entry for `key`
    async fn set_ex(&self, key: &str, value: String, ttl: TtlSecs) -> Result<()>;
    /// Returns whether a key was actually removed
    async fn delete(&self, key: &str) -> Result<bool>;
    async fn ping(&self) -> Result<()>;
    fn name(&self) -> &'static str;
}
