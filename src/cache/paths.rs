// Cache path utilities.
// Resolves where the cache file lives: the working directory or the user cache dir.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Cache file name, relative to the working directory by default.
pub const CACHE_FILE_NAME: &str = "cache.json";

/// Default cache location: `cache.json` in the current directory.
pub fn default_cache_path() -> PathBuf {
    PathBuf::from(CACHE_FILE_NAME)
}

/// Get the per-user cache directory (~/.cache/ghevents on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ghevents").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the cache file inside the per-user cache directory.
pub fn user_cache_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(CACHE_FILE_NAME))
}
