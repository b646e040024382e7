// Error types for ghevents.
// Covers transport, upstream GitHub, decode, and cache file errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhEventsError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    /// Non-success response from GitHub. Displays the upstream message as-is.
    #[error("{message}")]
    Upstream { message: String, status: u16 },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cache file {} is malformed: {source}", .path.display())]
    CacheCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GhEventsError>;
