use crate::{Error, TtlSecs};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::{warn, Level};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" | "testing" => Ok(Environment::Test),
            other => Err(Error::Config(format!("unknown environment '{other}'"))),
        }
    }
}

/// Which key-value backend the cache client talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Redis,
    Memory,
}

impl FromStr for StoreKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redis" => Ok(StoreKind::Redis),
            "memory" | "moka" => Ok(StoreKind::Memory),
            other => Err(Error::Config(format!(
                "unknown cache backend '{other}'. Must be 'redis' or 'memory'"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CacheSettings {
    pub backend: StoreKind,
    pub host: String,
    pub port: u16,
    pub db: i64,
    pub default_ttl: TtlSecs,
    pub memory_capacity: u64,
    pub connect_timeout: Duration,
    pub command_timeout: Duration,
}

impl CacheSettings {
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }

    /// In-memory settings with the stock TTL, used by tests and local runs.
    pub fn memory() -> Self {
        Self {
            backend: StoreKind::Memory,
            ..Config::from_lookup(|_| None).cache
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub host: String,
    pub http_port: u16,
    pub log_level: Level,
    pub app_name: String,
    pub service_name: String,
    pub cache: CacheSettings,
}

impl Config {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_HTTP_PORT: u16 = 5000;
    const DEFAULT_APP_NAME: &'static str = "DevOps Showcase";
    const DEFAULT_SERVICE_NAME: &'static str = "devops-showcase-api";
    const DEFAULT_REDIS_HOST: &'static str = "localhost";
    const DEFAULT_REDIS_PORT: u16 = 6379;
    const DEFAULT_CACHE_TTL_SECS: u64 = 300;
    const DEFAULT_MEMORY_CAPACITY: u64 = 10_000;
    const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2_000;
    const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 1_000;
    const TEST_REDIS_DB: i64 = 1;

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = parse_or(&lookup, "APP_ENV", Environment::Development);

        let default_level = match environment {
            Environment::Development => Level::DEBUG,
            Environment::Production | Environment::Test => Level::INFO,
        };
        let default_db = match environment {
            Environment::Test => Self::TEST_REDIS_DB,
            _ => 0,
        };

        let cache = CacheSettings {
            backend: parse_or(&lookup, "CACHE_BACKEND", StoreKind::Redis),
            host: lookup("REDIS_HOST").unwrap_or_else(|| Self::DEFAULT_REDIS_HOST.to_string()),
            port: parse_or(&lookup, "REDIS_PORT", Self::DEFAULT_REDIS_PORT),
            db: parse_or(&lookup, "REDIS_DB", default_db),
            default_ttl: ttl_or_default(&lookup, Self::DEFAULT_CACHE_TTL_SECS),
            memory_capacity: parse_or(
                &lookup,
                "CACHE_MEMORY_CAPACITY",
                Self::DEFAULT_MEMORY_CAPACITY,
            ),
            connect_timeout: Duration::from_millis(parse_or(
                &lookup,
                "REDIS_CONNECT_TIMEOUT_MS",
                Self::DEFAULT_CONNECT_TIMEOUT_MS,
            )),
            command_timeout: Duration::from_millis(parse_or(
                &lookup,
                "REDIS_COMMAND_TIMEOUT_MS",
                Self::DEFAULT_COMMAND_TIMEOUT_MS,
            )),
        };

        Self {
            environment,
            host: lookup("HTTP_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            http_port: parse_or(&lookup, "HTTP_PORT", Self::DEFAULT_HTTP_PORT),
            log_level: parse_or(&lookup, "LOG_LEVEL", default_level),
            app_name: Self::DEFAULT_APP_NAME.to_string(),
            service_name: Self::DEFAULT_SERVICE_NAME.to_string(),
            cache,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|err| {
            warn!("Invalid value '{}' for {}: {}. Using default {}", raw, key, err, default);
            default
        }),
        None => default,
    }
}

/// A parsed but zero TTL is rejected by every store, so it falls back too.
fn ttl_or_default<F>(lookup: &F, default: u64) -> TtlSecs
where
    F: Fn(&str) -> Option<String>,
{
    let ttl = TtlSecs(parse_or(lookup, "CACHE_TTL", default));
    ttl.validate().unwrap_or_else(|err| {
        warn!("Invalid value '{}' for CACHE_TTL: {}. Using default {}", ttl.0, err, default);
        TtlSecs(default)
    })
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
            Environment::Test => write!(f, "test"),
        }
    }
}

impl Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Redis => write!(f, "redis"),
            StoreKind::Memory => write!(f, "memory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_empty_environment() {
        let config = config_from(&[]);

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.cache.backend, StoreKind::Redis);
        assert_eq!(config.cache.redis_url(), "redis://localhost:6379/0");
        assert_eq!(config.cache.default_ttl, TtlSecs(300));
        assert_eq!(config.cache.connect_timeout, Duration::from_millis(2000));
        assert_eq!(config.cache.command_timeout, Duration::from_millis(1000));
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("APP_ENV", "production"),
            ("HTTP_PORT", "8080"),
            ("REDIS_HOST", "cache.internal"),
            ("REDIS_PORT", "6380"),
            ("REDIS_DB", "3"),
            ("CACHE_TTL", "60"),
            ("CACHE_BACKEND", "memory"),
            ("LOG_LEVEL", "warn"),
        ]);

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.log_level, Level::WARN);
        assert_eq!(config.cache.backend, StoreKind::Memory);
        assert_eq!(config.cache.redis_url(), "redis://cache.internal:6380/3");
        assert_eq!(config.cache.default_ttl, TtlSecs(60));
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = config_from(&[("REDIS_PORT", "not-a-port"), ("CACHE_TTL", "-5")]);

        assert_eq!(config.cache.port, 6379);
        assert_eq!(config.cache.default_ttl, TtlSecs(300));

        let config = config_from(&[("CACHE_TTL", "0")]);
        assert_eq!(config.cache.default_ttl, TtlSecs(300));
        assert!(config.cache.default_ttl.validate().is_ok());
    }

    #[test]
    fn test_test_environment_uses_separate_db() {
        let config = config_from(&[("APP_ENV", "test")]);

        assert_eq!(config.cache.db, 1);
        assert_eq!(config.log_level, Level::INFO);

        // An explicit db still wins
        let config = config_from(&[("APP_ENV", "test"), ("REDIS_DB", "4")]);
        assert_eq!(config.cache.db, 4);
    }

    #[test]
    fn test_store_kind_parsing() {
        assert_eq!("redis".parse::<StoreKind>().unwrap(), StoreKind::Redis);
        assert_eq!(" Memory ".parse::<StoreKind>().unwrap(), StoreKind::Memory);
        assert!(matches!("memcached".parse::<StoreKind>(), Err(Error::Config(_))));

        let config = config_from(&[("CACHE_BACKEND", "memcached")]);
        assert_eq!(config.cache.backend, StoreKind::Redis);
    }

    #[test]
    fn test_memory_settings() {
        let settings = CacheSettings::memory();
        assert_eq!(settings.backend, StoreKind::Memory);
        assert_eq!(settings.default_ttl, TtlSecs(300));
    }
}
