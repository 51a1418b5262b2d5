//! # Bragança Feeds
//!
//! Scrapes the Bragança municipality news listing and events agenda and
//! writes them as two JSON feeds for static sites and feed readers.
//!
//! ## Usage
//!
//! ```sh
//! braganca_feeds -o ./data
//! ```
//!
//! ## Architecture
//!
//! The application runs two independent pipelines concurrently:
//! 1. **Fetching**: Download each listing through the bounded [`fetcher`]
//! 2. **Extraction**: Turn list items into [`models`] via the [`scrapers`] rulesets
//! 3. **Output**: Write `news.json` and `events.json` once both pipelines succeeded
//!
//! Any fetch failure aborts the run before files are written.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod cli;
mod error;
mod fetcher;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use error::FeedError;
use fetcher::{FetchConfig, Fetcher};
use outputs::json::{self, EVENTS_FILE, NEWS_FILE};
use scrapers::{events, news};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("braganca_feeds starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Fail on a bad output path before touching the network
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let news_origin = Url::parse(&args.news_url)?;
    let events_origin = Url::parse(&args.events_url)?;

    let fetcher = Fetcher::new(FetchConfig {
        timeout: args.timeout(),
        address_family: args.address_family,
        ..FetchConfig::default()
    })?;

    // ---- Fetch and extract both feeds ----
    let (news_feed, events_feed) = match tokio::try_join!(
        news::get_news(&fetcher, &news_origin, args.news_limit),
        events::get_events(&fetcher, &events_origin, args.widget_id, args.events_limit),
    ) {
        Ok(feeds) => feeds,
        Err(e) => {
            let status = match &e {
                FeedError::Fetch(fetch) => fetch.status_code(),
                _ => None,
            };
            error!(error = %e, ?status, "Feed extraction failed; no files written");
            return Err(e.into());
        }
    };

    // ---- Output ----
    json::write_feed(&news_feed, &args.output_dir, NEWS_FILE).await?;
    json::write_feed(&events_feed, &args.output_dir, EVENTS_FILE).await?;

    let elapsed = start_time.elapsed();
    info!(
        news = news_feed.items.len(),
        events = events_feed.items.len(),
        millis = elapsed.as_millis() as u64,
        "Feeds gerados em {}",
        args.output_dir.display()
    );

    Ok(())
}
