//! Command-line interface definitions for Bragança Feeds.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option has a default matching the production setup, so the binary
//! can run with no arguments; most can also be set via environment variables.

use crate::fetcher::{AddressFamily, DEFAULT_TIMEOUT};
use crate::scrapers::{events, news};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for the Bragança Feeds application.
///
/// # Examples
///
/// ```sh
/// # Write data/news.json and data/events.json
/// braganca_feeds
///
/// # Different output directory and agenda widget
/// braganca_feeds -o ./public/feeds --widget-id 16
///
/// # Let the OS choose the address family, shorter timeout
/// braganca_feeds --address-family any --timeout-ms 5000
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for news.json and events.json
    #[arg(short, long, env = "FEEDS_OUTPUT_DIR", default_value = "data")]
    pub output_dir: PathBuf,

    /// News listing page
    #[arg(long, env = "FEEDS_NEWS_URL", default_value = news::NEWS_ORIGIN)]
    pub news_url: String,

    /// Events agenda page
    #[arg(long, env = "FEEDS_EVENTS_URL", default_value = events::EVENTS_ORIGIN)]
    pub events_url: String,

    /// Maximum number of news items kept
    #[arg(long, default_value_t = news::DEFAULT_LIMIT)]
    pub news_limit: usize,

    /// Maximum number of events kept
    #[arg(long, default_value_t = events::DEFAULT_LIMIT)]
    pub events_limit: usize,

    /// Agenda widget to read events from
    #[arg(long, default_value_t = events::DEFAULT_WIDGET_ID)]
    pub widget_id: u32,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "FEEDS_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,

    /// Address family outbound connections are pinned to
    #[arg(long, value_enum, default_value_t = AddressFamily::Ipv4)]
    pub address_family: AddressFamily,
}

impl Cli {
    /// The per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
