use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError, RedisResult};
use shared::config::CacheSettings;
use shared::{Error, Result, TtlSecs};
use showcase::ports::KeyValueStore;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Redis-backed store speaking the native wire protocol
///
/// `ConnectionManager` is a cheap-to-clone multiplexed handle, so every call
/// works on its own clone and no locking is needed.
pub struct RedisStore {
    manager: ConnectionManager,
    url: String,
    command_timeout: Duration,
}

impl RedisStore {
    pub async fn connect(settings: &CacheSettings) -> Result<Self> {
        Self::open(
            &settings.redis_url(),
            settings.connect_timeout,
            settings.command_timeout,
        )
        .await
    }

    /// Dial `url` and verify the server answers a PING
    pub async fn open(url: &str, connect_timeout: Duration, command_timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(url).map_err(into_error)?;

        let manager = timeout(connect_timeout, client.get_connection_manager())
            .await
            .map_err(|_| Error::Timeout(connect_timeout))?
            .map_err(into_error)?;

        let store = Self {
            manager,
            url: url.to_string(),
            command_timeout,
        };
        store.ping().await?;

        Ok(store)
    }

    /// Bound a single command by the configured timeout
    async fn run<T, F>(&self, command: F) -> Result<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        timeout(self.command_timeout, command)
            .await
            .map_err(|_| Error::Timeout(self.command_timeout))?
            .map_err(into_error)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        self.run(async move { conn.get(key).await }).await
    }

    async fn set_ex(&self, key: &str, value: String, ttl: TtlSecs) -> Result<()> {
        let ttl = ttl.validate()?;
        let mut conn = self.manager.clone();
        self.run(async move {
            redis::cmd("SET")
                .arg(key)
                .arg(value)
                .arg("EX")
                .arg(ttl.0)
                .query_async(&mut conn)
                .await
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.manager.clone();
        let removed: u64 = self.run(async move { conn.del(key).await }).await?;
        Ok(removed > 0)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: String = self
            .run(async move { redis::cmd("PING").query_async(&mut conn).await })
            .await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

fn into_error(err: RedisError) -> Error {
    if err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
    {
        Error::Connection(err.to_string())
    } else {
        Error::Backend(err.to_string())
    }
}

impl Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("url", &self.url)
            .field("command_timeout", &self.command_timeout)
            .finish()
    }
}
