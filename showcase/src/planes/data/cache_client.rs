use crate::ports::{KeyValueStore, StoreFactory};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::config::CacheSettings;
use shared::{Result, TtlSecs};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{error, info};

/// Link to the backend, fixed for the lifetime of the client
#[derive(Clone)]
pub enum ConnectionHandle {
    Connected(Arc<dyn KeyValueStore>),
    Disconnected,
}

/// Failure-tolerant front for a remote TTL key-value store
///
/// Every operation first checks the handle, then the outcome of the remote
/// call. Both failure classes collapse into `None` or `false`, so callers
/// never handle backend errors and the cache degrades to "always miss".
#[derive(Clone)]
pub struct CacheClient {
    handle: ConnectionHandle,
}

impl CacheClient {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            handle: ConnectionHandle::Connected(store),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            handle: ConnectionHandle::Disconnected,
        }
    }

    /// Open the backend through `factory`. Never fails: a connection error is
    /// logged and the client stays disconnected for its whole lifetime.
    pub async fn connect(factory: &dyn StoreFactory, settings: &CacheSettings) -> Self {
        match factory.connect(settings).await {
            Ok(store) => {
                info!("Cache connection established ({})", store.name());
                Self::new(store)
            }
            Err(e) => {
                error!("Failed to connect to cache backend: {}", e);
                Self::disconnected()
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.handle, ConnectionHandle::Connected(_))
    }

    /// Fetch and deserialize `key`. `None` covers both "never set" and
    /// "could not be read".
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let ConnectionHandle::Connected(store) = &self.handle else {
            return None;
        };

        let result: Result<Option<T>> = async {
            match store.get(key).await? {
                Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
                None => Ok(None),
            }
        }
        .await;

        result.unwrap_or_else(|e| {
            error!(key, "Cache get error: {}", e);
            None
        })
    }

    /// Serialize `value` and write it with expiry `ttl`, replacing any entry
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: TtlSecs) -> bool {
        let ConnectionHandle::Connected(store) = &self.handle else {
            return false;
        };

        let result: Result<()> = async {
            let serialized = serde_json::to_string(value)?;
            store.set_ex(key, serialized, ttl).await
        }
        .await;

        succeeded("set", key, result)
    }

    /// Reports whether the delete request itself succeeded; a missing key is
    /// not an error
    pub async fn delete(&self, key: &str) -> bool {
        let ConnectionHandle::Connected(store) = &self.handle else {
            return false;
        };

        succeeded("delete", key, store.delete(key).await.map(|_| ()))
    }

    /// Liveness probe of the backend. Read-only; used by readiness checks.
    pub async fn check_connection(&self) -> bool {
        let ConnectionHandle::Connected(store) = &self.handle else {
            return false;
        };

        match store.ping().await {
            Ok(()) => true,
            Err(e) => {
                error!("Cache health check failed: {}", e);
                false
            }
        }
    }
}

fn succeeded(op: &str, key: &str, result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            error!(key, "Cache {} error: {}", op, e);
            false
        }
    }
}

impl Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionHandle::Connected(store) => {
                f.debug_tuple("Connected").field(&store.name()).finish()
            }
            ConnectionHandle::Disconnected => f.write_str("Disconnected"),
        }
    }
}

impl Debug for CacheClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheClient")
            .field("handle", &self.handle)
            .finish()
    }
}
