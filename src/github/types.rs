// GitHub API response types.
// Defines structs for deserializing the user events feed and error bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Actor that triggered an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub login: String,
}

/// Repository an event happened in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRepo {
    pub name: String,
    pub url: String,
}

/// One entry of a user's public event feed.
///
/// Only the fields the CLI prints are kept; everything else GitHub sends is
/// ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub actor: Actor,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
}

/// Error body GitHub returns alongside non-success status codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default)]
    pub documentation_url: String,
    #[serde(default)]
    pub status: String,
}
