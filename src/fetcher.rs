//! Bounded page fetcher.
//!
//! Every request made by the feed pipelines goes through [`Fetcher`], which
//! wraps a single `reqwest::Client` configured with:
//!
//! - an address family pin (IPv4 by default, see [`AddressFamily`])
//! - browser-like `User-Agent` and `Accept-Language` headers
//! - automatic redirect following
//!
//! Each call is bounded by a wall-clock timeout covering connect, headers and
//! body. When the bound is hit the request future is dropped, which cancels
//! the in-flight request and releases its timer.
//!
//! Extractors do not depend on `Fetcher` directly but on the [`PageSource`]
//! trait, so tests can hand them static HTML.

use crate::error::FetchError;
use clap::ValueEnum;
use reqwest::header::{ACCEPT_LANGUAGE, REFERER};
use reqwest::{Client, redirect};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};
use url::Url;

/// Default bound for a single fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Desktop browser identification sent with every request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Language preference biased toward Portuguese.
pub const PORTUGUESE_ACCEPT_LANGUAGE: &str = "pt-PT,pt;q=0.9,en;q=0.8";

const MAX_REDIRECTS: usize = 10;

/// Something that can hand back the HTML of a page.
///
/// Implemented by [`Fetcher`] for real network access and by fixtures in tests.
pub trait PageSource {
    /// Retrieve the page at `url` as text.
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError>;
}

/// Address family outbound connections are restricted to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AddressFamily {
    /// Only connect to IPv4 addresses.
    #[default]
    Ipv4,
    /// Only connect to IPv6 addresses.
    Ipv6,
    /// Let the resolver and connector decide.
    Any,
}

impl AddressFamily {
    /// Local bind address that pins connections to this family.
    fn local_address(self) -> Option<IpAddr> {
        match self {
            AddressFamily::Ipv4 => Some(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            AddressFamily::Ipv6 => Some(IpAddr::V6(Ipv6Addr::UNSPECIFIED)),
            AddressFamily::Any => None,
        }
    }
}

/// Construction-time settings for [`Fetcher`].
#[derive(Clone, Debug)]
pub struct FetchConfig {
    /// Bound applied by [`Fetcher::fetch_html`].
    pub timeout: Duration,
    pub address_family: AddressFamily,
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            address_family: AddressFamily::default(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            accept_language: PORTUGUESE_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

/// HTTP fetcher with a hard per-request timeout.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
    accept_language: String,
    timeout: Duration,
}

impl Fetcher {
    /// Build a fetcher from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the underlying client cannot be built
    /// (for instance when the TLS backend fails to initialize).
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .local_address(config.address_family.local_address())
            .build()
            .map_err(FetchError::Client)?;

        debug!(
            address_family = ?config.address_family,
            timeout_ms = config.timeout.as_millis() as u64,
            "Built HTTP client"
        );

        Ok(Self {
            client,
            accept_language: config.accept_language,
            timeout: config.timeout,
        })
    }

    /// GET `url` and return the body, failing if nothing completes within `bound`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Timeout`] when `bound` elapses first
    /// - [`FetchError::Status`] for a non-2xx response (the body is not read)
    /// - [`FetchError::Network`] for transport failures
    #[instrument(level = "info", skip(self), fields(url = %url, timeout_ms = bound.as_millis() as u64))]
    pub async fn fetch_html_within(&self, url: &Url, bound: Duration) -> Result<String, FetchError> {
        match timeout(bound, self.get_text(url)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Request timed out; cancelled");
                Err(FetchError::Timeout(bound))
            }
        }
    }

    async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
            .header(REFERER, url.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Non-success response");
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}

impl PageSource for Fetcher {
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError> {
        self.fetch_html_within(url, self.timeout).await
    }
}
