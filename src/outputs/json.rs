//! JSON output generation for the feeds.
//!
//! Each feed is serialized pretty-printed (two-space indentation) and written
//! in one shot, replacing whatever the previous run left behind.

use crate::error::FeedError;
use crate::models::FeedResult;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// File name of the news feed.
pub const NEWS_FILE: &str = "news.json";

/// File name of the events feed.
pub const EVENTS_FILE: &str = "events.json";

/// Write `feed` to `{output_dir}/{file_name}`.
///
/// # Returns
///
/// The path written to.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails. The output
/// directory is expected to exist.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), file_name = %file_name))]
pub async fn write_feed<T: Serialize>(
    feed: &FeedResult<T>,
    output_dir: &Path,
    file_name: &str,
) -> Result<PathBuf, FeedError> {
    let json = serde_json::to_string_pretty(feed)?;
    let path = output_dir.join(file_name);

    if let Err(e) = fs::write(&path, json).await {
        error!(path = %path.display(), error = %e, "Failed to write feed");
        return Err(e.into());
    }

    info!(path = %path.display(), items = feed.items.len(), "Wrote feed");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventItem, NewsItem};
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_write_news_feed_pretty() {
        let tmp = tempfile::tempdir().unwrap();
        let feed = FeedResult {
            widget_id: None,
            fetched_at: Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap(),
            items: vec![NewsItem {
                title: "Abertura de Candidaturas".to_string(),
                link: "https://www.cm-braganca.pt/noticias/123".to_string(),
                date_text: None,
                image: None,
            }],
        };

        let path = write_feed(&feed, tmp.path(), NEWS_FILE).await.unwrap();
        assert_eq!(path, tmp.path().join("news.json"));

        let written = std::fs::read_to_string(&path).unwrap();
        let expected = r#"{
  "fetchedAt": "2026-10-19T08:00:00.000Z",
  "items": [
    {
      "title": "Abertura de Candidaturas",
      "link": "https://www.cm-braganca.pt/noticias/123"
    }
  ]
}"#;
        assert_eq!(written, expected);
    }

    #[tokio::test]
    async fn test_write_events_feed_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(EVENTS_FILE), "stale").unwrap();

        let feed: FeedResult<EventItem> = FeedResult {
            widget_id: Some(15),
            fetched_at: Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap(),
            items: vec![],
        };
        write_feed(&feed, tmp.path(), EVENTS_FILE).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(tmp.path().join(EVENTS_FILE)).unwrap())
                .unwrap();
        assert_eq!(value["widgetId"], 15);
        assert_eq!(value["items"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_missing_directory_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let feed: FeedResult<NewsItem> = FeedResult {
            widget_id: None,
            fetched_at: Utc::now(),
            items: vec![],
        };
        let err = write_feed(&feed, &tmp.path().join("absent"), NEWS_FILE)
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Io(_)));
    }
}
