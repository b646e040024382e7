//! ghevents library
//!
//! Fetches a GitHub user's public events through a file-backed cache that
//! keeps each user's feed fresh for 10 minutes.

pub mod cache;
pub mod cli;
pub mod error;
pub mod fetcher;
pub mod github;
pub mod output;

pub use cache::{CacheEntry, EventCache};
pub use error::{GhEventsError, Result};
pub use fetcher::{EventFetcher, cache_key};
