// Cache-aware event fetching.
// Serves fresh cache entries directly and refreshes missing or stale ones from GitHub.

use std::sync::Arc;

use tracing::info;

use crate::cache::{CacheEntry, DEFAULT_TTL, EventCache};
use crate::error::Result;
use crate::github::{GitHubClient, GithubEvent};

/// Cache key under which a user's events are stored.
pub fn cache_key(username: &str) -> String {
    format!("github-events-{}", username)
}

/// Fetches user events through the shared cache.
pub struct EventFetcher {
    client: GitHubClient,
    cache: Arc<EventCache>,
}

impl EventFetcher {
    pub fn new(client: GitHubClient, cache: Arc<EventCache>) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &Arc<EventCache> {
        &self.cache
    }

    /// Return a user's events, from the cache when fresh, otherwise from GitHub.
    ///
    /// A successful refresh is stored with a 10 minute expiry and the whole
    /// cache is saved before returning. A failed refresh leaves the cache
    /// untouched. The cache lock is not held across the request, so two
    /// concurrent calls for the same user may both refresh.
    pub async fn fetch_events(&self, username: &str) -> Result<Vec<GithubEvent>> {
        let key = cache_key(username);

        match self.cache.get(&key) {
            Some(entry) if entry.is_fresh() => {
                info!(key = %key, expires_at = %entry.expires_at, "Returning cached data");
                return Ok(entry.data);
            }
            Some(entry) => {
                info!(key = %key, expired_at = %entry.expires_at, "Cache expired, fetching fresh data");
            }
            None => info!(key = %key, "Cache miss, fetching fresh data"),
        }

        let events = self.client.get_user_events(username).await?;

        self.cache
            .put(key, CacheEntry::new(events.clone(), DEFAULT_TTL));
        self.cache.save()?;

        info!(count = events.len(), "Returning fresh data");
        Ok(events)
    }
}
