// Cache module for local filesystem caching.
// Keeps fetched event feeds with an expiry so repeat runs skip the network.

pub mod paths;
pub mod store;

pub use paths::{CACHE_FILE_NAME, default_cache_path, user_cache_path};
pub use store::{CacheEntry, DEFAULT_TTL, EventCache};
