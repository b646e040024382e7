// Expiring event cache backed by a single JSON file.
// Holds the key -> entry map behind one mutex; load/save move the whole map.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GhEventsError, Result};
use crate::github::GithubEvent;

/// Freshness window applied to every entry at write time: 10 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Cached events for one key plus the instant they stop being fresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(rename = "Data")]
    pub data: Vec<GithubEvent>,
    #[serde(rename = "ExpiresAt")]
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry that expires `ttl` from now.
    pub fn new(data: Vec<GithubEvent>, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self::expiring_at(data, expires_at)
    }

    /// Create an entry with an explicit expiration instant.
    pub fn expiring_at(data: Vec<GithubEvent>, expires_at: DateTime<Utc>) -> Self {
        Self { data, expires_at }
    }

    /// Fresh means `now` is strictly before the expiration instant.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }
}

/// Map of cache key to entry, persisted as one JSON document.
///
/// Every operation takes the lock for its own duration only. Callers that
/// read, check freshness, and then write are not atomic as a whole: two
/// refreshes of the same key may both run, and the last `put` wins.
/// Stale entries are never removed, only overwritten.
#[derive(Debug)]
pub struct EventCache {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, CacheEntry>>,
}

impl EventCache {
    /// Create an empty cache persisted at `path`. Nothing is read until `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, CacheEntry>> {
        // The map is only ever replaced or inserted into, so a poisoned lock
        // still guards a consistent map.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the in-memory map with the contents of the backing file.
    ///
    /// A missing file leaves the cache as it is. A file that does not parse
    /// is reported as `CacheCorrupt` and nothing is loaded.
    pub fn load(&self) -> Result<()> {
        let mut entries = self.lock();

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Cache file not found, starting fresh");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let loaded: BTreeMap<String, CacheEntry> =
            serde_json::from_str(&contents).map_err(|source| GhEventsError::CacheCorrupt {
                path: self.path.clone(),
                source,
            })?;

        *entries = loaded;
        info!(path = %self.path.display(), entries = entries.len(), "Cache loaded");
        Ok(())
    }

    /// Write the whole map to the backing file, replacing what was there.
    pub fn save(&self) -> Result<()> {
        let entries = self.lock();
        let json = serde_json::to_string_pretty(&*entries)?;
        write_file(&self.path, json.as_bytes())?;
        info!(path = %self.path.display(), entries = entries.len(), "Cache saved");
        Ok(())
    }

    /// Look up an entry without judging its freshness.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        let entry = self.lock().get(key).cloned();
        debug!(key, found = entry.is_some(), expires_at = ?entry.as_ref().map(|e| e.expires_at), "Cache lookup");
        entry
    }

    /// Insert an entry, overwriting any existing one for `key`.
    pub fn put(&self, key: impl Into<String>, entry: CacheEntry) {
        let key = key.into();
        debug!(key = %key, expires_at = %entry.expires_at, "Cache updated");
        self.lock().insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Write a file atomically via a temp file, creating parent directories.
fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{Actor, EventRepo};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn event(kind: &str) -> GithubEvent {
        GithubEvent {
            event_type: kind.to_string(),
            actor: Actor {
                login: "alice".to_string(),
            },
            repo: EventRepo {
                name: "alice/project".to_string(),
                url: "https://api.github.com/repos/alice/project".to_string(),
            },
            created_at: Utc.with_ymd_and_hms(2024, 3, 4, 5, 6, 7).unwrap(),
        }
    }

    fn create_test_cache() -> (EventCache, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let cache = EventCache::new(temp_dir.path().join("cache.json"));
        (cache, temp_dir)
    }

    #[test]
    fn test_load_missing_file_leaves_cache_empty() {
        let (cache, _temp_dir) = create_test_cache();

        cache.load().unwrap();

        assert!(cache.is_empty());
        assert!(!cache.path().exists());
    }

    #[test]
    fn test_load_malformed_file_is_corrupt() {
        let (cache, _temp_dir) = create_test_cache();
        fs::write(cache.path(), "{ not json").unwrap();

        let err = cache.load().unwrap_err();

        assert!(matches!(err, GhEventsError::CacheCorrupt { .. }));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_corrupt() {
        let (cache, _temp_dir) = create_test_cache();
        fs::write(cache.path(), r#"{"github-events-alice": {"Data": "nope"}}"#).unwrap();

        assert!(matches!(
            cache.load(),
            Err(GhEventsError::CacheCorrupt { .. })
        ));
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let (cache, _temp_dir) = create_test_cache();
        let expires_at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let stale_at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        cache.put(
            "github-events-alice",
            CacheEntry::expiring_at(vec![event("PushEvent"), event("WatchEvent")], expires_at),
        );
        cache.put(
            "github-events-bob",
            CacheEntry::expiring_at(vec![], stale_at),
        );

        cache.save().unwrap();

        let reloaded = EventCache::new(cache.path());
        reloaded.load().unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get("github-events-alice"), cache.get("github-events-alice"));
        assert_eq!(reloaded.get("github-events-bob"), cache.get("github-events-bob"));
    }

    #[test]
    fn test_save_writes_indented_document() {
        let (cache, _temp_dir) = create_test_cache();
        cache.put("k", CacheEntry::new(vec![event("PushEvent")], DEFAULT_TTL));

        cache.save().unwrap();

        let contents = fs::read_to_string(cache.path()).unwrap();
        assert!(contents.contains("\n  \"k\": {"));
        assert!(contents.contains("\"Data\""));
        assert!(contents.contains("\"ExpiresAt\""));
        assert!(contents.contains("\"type\": \"PushEvent\""));
        assert!(!cache.path().with_extension("tmp").exists());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("cache.json");
        let cache = EventCache::new(&path);

        cache.save().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_load_accepts_offset_timestamps() {
        let (cache, _temp_dir) = create_test_cache();
        let json = r#"{
 "github-events-alice": {
  "Data": [
   {
    "type": "PushEvent",
    "actor": { "login": "alice" },
    "repo": { "name": "alice/project", "url": "https://api.github.com/repos/alice/project" },
    "created_at": "2024-03-04T05:06:07Z"
   }
  ],
  "ExpiresAt": "2024-03-04T07:16:07.123456789+02:00"
 }
}"#;
        fs::write(cache.path(), json).unwrap();

        cache.load().unwrap();

        let entry = cache.get("github-events-alice").unwrap();
        assert_eq!(entry.data, vec![event("PushEvent")]);
        assert_eq!(
            entry.expires_at,
            Utc.with_ymd_and_hms(2024, 3, 4, 5, 16, 7).unwrap()
                + chrono::Duration::nanoseconds(123_456_789)
        );
    }

    #[test]
    fn test_load_replaces_in_memory_entries() {
        let (cache, _temp_dir) = create_test_cache();
        fs::write(cache.path(), "{}").unwrap();
        cache.put("github-events-alice", CacheEntry::new(vec![], DEFAULT_TTL));

        cache.load().unwrap();

        assert!(cache.get("github-events-alice").is_none());
    }

    #[test]
    fn test_put_overwrites_existing_entry() {
        let (cache, _temp_dir) = create_test_cache();
        cache.put("k", CacheEntry::new(vec![event("First")], DEFAULT_TTL));
        cache.put("k", CacheEntry::new(vec![event("Second")], DEFAULT_TTL));

        let entry = cache.get("k").unwrap();
        assert_eq!(entry.data, vec![event("Second")]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_freshness_is_strict() {
        let expires_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let entry = CacheEntry::expiring_at(vec![], expires_at);

        assert!(entry.is_fresh_at(expires_at - chrono::Duration::seconds(1)));
        assert!(!entry.is_fresh_at(expires_at));
        assert!(!entry.is_fresh_at(expires_at + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_new_entry_expires_after_ttl() {
        let before = Utc::now();
        let entry = CacheEntry::new(vec![], DEFAULT_TTL);
        let after = Utc::now();

        assert!(entry.is_fresh());
        assert!(entry.expires_at >= before + chrono::Duration::minutes(10));
        assert!(entry.expires_at <= after + chrono::Duration::minutes(10));
    }
}
