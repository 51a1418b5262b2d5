//! Error types for fetching and feed extraction.
//!
//! Two layers:
//! - [`FetchError`]: what can go wrong while retrieving a page
//! - [`FeedError`]: everything a pipeline can fail with, fetch errors included
//!
//! A selector that matches nothing is not an error anywhere in this crate;
//! items with missing fields are simply left out of the feed.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Failure while retrieving a page through the bounded fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No complete response arrived within the bound.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    /// Connection, DNS, TLS, redirect or body read failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// A response arrived but its status is outside the 2xx range.
    #[error("HTTP {}", .0.as_u16())]
    Status(StatusCode),
    /// The HTTP client itself could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    /// Status code carried by an HTTP-status failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status(status) => Some(status.as_u16()),
            _ => None,
        }
    }
}

/// Failure of a feed pipeline.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display_and_code() {
        let err = FetchError::Status(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "HTTP 404");
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_timeout_display() {
        let err = FetchError::Timeout(Duration::from_millis(50));
        assert_eq!(err.to_string(), "request timed out after 50ms");
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_fetch_error_is_transparent_in_feed_error() {
        let err: FeedError = FetchError::Status(StatusCode::BAD_GATEWAY).into();
        assert_eq!(err.to_string(), "HTTP 502");
    }
}
