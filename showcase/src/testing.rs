//! In-process stores used by the unit tests of this crate.

use crate::ports::{KeyValueStore, StoreFactory};
use async_trait::async_trait;
use shared::config::CacheSettings;
use shared::{Error, Result, TtlSecs};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// HashMap-backed store honouring per-entry expiry
pub struct MemoryStore {
    entries: Mutex<HashMap<String, (String, Option<Instant>)>>,
    available: AtomicBool,
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            gets: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
        }
    }
}

impl MemoryStore {
    pub fn insert_raw(&self, key: &str, raw: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (raw.to_string(), None));
    }

    /// Simulate the backend going away (or coming back)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::Connection("connection refused".to_string()))
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.ensure_available()?;
        self.gets.fetch_add(1, Ordering::SeqCst);

        let mut entries = self.entries.lock().unwrap();
        let expired = matches!(entries.get(key), Some((_, Some(at))) if *at <= Instant::now());
        if expired {
            entries.remove(key);
        }
        Ok(entries.get(key).map(|(raw, _)| raw.clone()))
    }

    async fn set_ex(&self, key: &str, value: String, ttl: TtlSecs) -> Result<()> {
        self.ensure_available()?;
        let ttl = ttl.validate()?;
        self.sets.fetch_add(1, Ordering::SeqCst);

        let expires_at = Instant::now() + ttl.as_duration();
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value, Some(expires_at)));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.ensure_available()?;
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    async fn ping(&self) -> Result<()> {
        self.ensure_available()
    }

    fn name(&self) -> &'static str {
        "test-memory"
    }
}

/// Store whose every call fails, as a dead backend would
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Backend("boom".to_string()))
    }

    async fn set_ex(&self, _key: &str, _value: String, _ttl: TtlSecs) -> Result<()> {
        Err(Error::Backend("boom".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Err(Error::Backend("boom".to_string()))
    }

    async fn ping(&self) -> Result<()> {
        Err(Error::Connection("connection refused".to_string()))
    }

    fn name(&self) -> &'static str {
        "test-failing"
    }
}

/// Factory that can never reach its backend
pub struct FailingFactory;

#[async_trait]
impl StoreFactory for FailingFactory {
    async fn connect(&self, settings: &CacheSettings) -> Result<Arc<dyn KeyValueStore>> {
        Err(Error::Connection(format!(
            "{} unreachable",
            settings.redis_url()
        )))
    }
}
