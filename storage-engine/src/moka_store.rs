use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use shared::{Result, TtlSecs};
use showcase::ports::KeyValueStore;
use std::fmt::Debug;
use std::time::{Duration, Instant};

/// Stored text plus the TTL it was written with
#[derive(Clone)]
struct Entry {
    raw: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was (last) written with
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, value: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-based in-process store with per-entry TTL
/// Lock-free and concurrent; the capacity bound only guards memory
pub struct MokaStore {
    cache: Cache<String, Entry>,
}

impl MokaStore {
    /// Create a Moka store with an optional entry bound
    pub fn new(name: &str, max_entries: Option<u64>) -> Self {
        let mut builder = Cache::builder().name(name).expire_after(PerEntryTtl);

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        Self {
            cache: builder.build(),
        }
    }
}

#[async_trait]
impl KeyValueStore for MokaStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // Either doesn't exist or TTL expired
        Ok(self.cache.get(key).await.map(|entry| entry.raw))
    }

    async fn set_ex(&self, key: &str, value: String, ttl: TtlSecs) -> Result<()> {
        let ttl = ttl.validate()?;
        let entry = Entry {
            raw: value,
            ttl: ttl.as_duration(),
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

impl Debug for MokaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaStore")
            .field("entry_count", &self.cache.entry_count())
            .field("weighted_size", &self.cache.weighted_size())
            .finish()
    }
}
