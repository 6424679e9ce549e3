pub mod domain;
pub mod planes;
pub mod ports;

#[cfg(test)]
mod testing;

// Re-export key types
pub use planes::control::HealthService;
pub use planes::data::{CacheClient, ConnectionHandle, ReadThroughService};
pub use ports::{KeyValueStore, StoreFactory};
