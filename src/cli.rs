//! Command-line interface parsing for ghevents
//!
//! Parses arguments with clap and resolves them into a `Config` the binary
//! runs from.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::cache::{default_cache_path, user_cache_path};
use crate::github::GITHUB_API_BASE;

/// Printed when no username is given.
pub const USAGE: &str = "Usage: ghevents <github-username>";

/// Error types for CLI argument resolution
#[derive(Debug, Error)]
pub enum CliError {
    /// `--user-cache` was requested but the platform has no cache directory
    #[error("Could not determine a user cache directory; use --cache-file instead")]
    NoCacheDir,
}

/// ghevents - print a GitHub user's recent public events
#[derive(Parser, Debug)]
#[command(name = "ghevents")]
#[command(about = "Print a GitHub user's recent public events, cached for 10 minutes")]
#[command(version)]
pub struct Cli {
    /// GitHub username whose public events are printed
    pub username: Option<String>,

    /// Cache file to read and write
    #[arg(long, value_name = "PATH", conflicts_with = "user_cache")]
    pub cache_file: Option<PathBuf>,

    /// Keep the cache in the per-user cache directory instead of ./cache.json
    #[arg(long)]
    pub user_cache: bool,

    /// GitHub API base URL
    #[arg(long, value_name = "URL", default_value = GITHUB_API_BASE, hide = true)]
    pub api_url: String,

    /// Log cache and request activity to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Runtime configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// User to fetch; `None` means print usage and stop
    pub username: Option<String>,
    /// Backing file of the event cache
    pub cache_path: PathBuf,
    /// GitHub API base URL
    pub api_url: String,
    /// Raise the default log level to debug
    pub verbose: bool,
}

impl Config {
    /// Creates a Config from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Config)` with the cache path resolved
    /// * `Err(CliError::NoCacheDir)` if `--user-cache` cannot be honoured
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let cache_path = match (&cli.cache_file, cli.user_cache) {
            (Some(path), _) => path.clone(),
            (None, true) => user_cache_path().ok_or(CliError::NoCacheDir)?,
            (None, false) => default_cache_path(),
        };

        Ok(Config {
            username: cli.username.clone().filter(|name| !name.is_empty()),
            cache_path,
            api_url: cli.api_url.clone(),
            verbose: cli.verbose,
        })
    }
}
