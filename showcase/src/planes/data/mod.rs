pub mod cache_client;
pub mod read_through;

pub use cache_client::{CacheClient, ConnectionHandle};
pub use read_through::ReadThroughService;
