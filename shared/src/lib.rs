// shared/src/lib.rs

use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("connection: {0}")]
    Connection(String),
    #[error("backend: {0}")]
    Backend(String),
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid ttl: {0} seconds")]
    InvalidTtl(u64),
    #[error("config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Time-to-live in whole seconds, the unit the backend enforces expiry in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TtlSecs(pub u64);

impl TtlSecs {
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }

    /// Stores reject a zero TTL; `SET .. EX 0` is an error on the wire too.
    pub fn validate(self) -> Result<Self> {
        if self.0 == 0 {
            return Err(Error::InvalidTtl(self.0));
        }
        Ok(self)
    }
}

pub mod config;
