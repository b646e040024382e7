//! ghevents - print a GitHub user's recent public events
//!
//! Results are cached in a JSON file so repeat runs within 10 minutes do not
//! hit the API.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ghevents::cli::{Cli, Config, USAGE};
use ghevents::github::GitHubClient;
use ghevents::output::write_events;
use ghevents::{EventCache, EventFetcher, Result};

/// Initialize the tracing subscriber for logging to stderr.
///
/// RUST_LOG controls the filter; `--verbose` turns on debug output for this crate.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,ghevents=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(username) = config.username.as_deref() else {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    };

    init_tracing(config.verbose);

    match run(&config, username).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config, username: &str) -> Result<()> {
    debug!(?config, "Starting");

    let cache = Arc::new(EventCache::new(&config.cache_path));
    cache.load()?;

    let client = GitHubClient::from_env(&config.api_url)?;
    let fetcher = EventFetcher::new(client, Arc::clone(&cache));
    let events = fetcher.fetch_events(username).await?;

    write_events(&mut io::stdout().lock(), &events)?;

    cache.save()?;
    Ok(())
}
