//! Data models for the extracted feeds.
//!
//! This module defines the structures written to disk:
//! - [`NewsItem`]: one entry of the news listing
//! - [`EventItem`]: one entry of the events agenda
//! - [`FeedResult`]: the envelope holding the fetch timestamp and the items
//!
//! Field names are serialized in camelCase and absent optional fields are left
//! out of the JSON entirely, so downstream consumers see `dateText` only when
//! a date was found.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// A news entry scraped from the municipality's news listing.
///
/// Only constructed when both a title and a link were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// The headline, trimmed and non-empty.
    pub title: String,
    /// Absolute URL of the full article.
    pub link: String,
    /// Display date as shown on the card, whitespace-collapsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_text: Option<String>,
    /// Absolute URL of the card thumbnail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// An event entry scraped from one agenda widget.
///
/// Events are kept even without a link; the date text is always present but
/// may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub date_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Envelope written to each feed file.
///
/// # JSON Shape
///
/// ```text
/// { "widgetId": 15, "fetchedAt": "2026-10-19T08:30:00.000Z", "items": [...] }
/// ```
///
/// `widgetId` only appears on the events feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResult<T> {
    /// Agenda widget the items were scoped to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_id: Option<u32>,
    /// When the pipeline started fetching.
    #[serde(serialize_with = "serialize_timestamp")]
    pub fetched_at: DateTime<Utc>,
    /// Items in document order, already truncated to the requested limit.
    pub items: Vec<T>,
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_news_feed_serialization_omits_absent_fields() {
        let feed = FeedResult {
            widget_id: None,
            fetched_at: fixed_time(),
            items: vec![NewsItem {
                title: "Abertura de Candidaturas".to_string(),
                link: "https://www.cm-braganca.pt/noticias/123".to_string(),
                date_text: None,
                image: None,
            }],
        };

        let json = serde_json::to_value(&feed).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fetchedAt": "2026-10-19T08:30:00.000Z",
                "items": [{
                    "title": "Abertura de Candidaturas",
                    "link": "https://www.cm-braganca.pt/noticias/123"
                }]
            })
        );
    }

    #[test]
    fn test_events_feed_key_order() {
        let feed = FeedResult {
            widget_id: Some(15),
            fetched_at: fixed_time(),
            items: vec![EventItem {
                title: "Feira do Fumeiro".to_string(),
                link: None,
                date_text: String::new(),
                image: Some("https://www.cm-braganca.pt/img/a.jpg".to_string()),
            }],
        };

        let json = serde_json::to_string(&feed).unwrap();
        assert_eq!(
            json,
            r#"{"widgetId":15,"fetchedAt":"2026-10-19T08:30:00.000Z","items":[{"title":"Feira do Fumeiro","dateText":"","image":"https://www.cm-braganca.pt/img/a.jpg"}]}"#
        );
    }

    #[test]
    fn test_news_item_with_all_fields() {
        let item = NewsItem {
            title: "T".to_string(),
            link: "https://a/b".to_string(),
            date_text: Some("12 fev 2026".to_string()),
            image: Some("https://a/c.jpg".to_string()),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"title":"T","link":"https://a/b","dateText":"12 fev 2026","image":"https://a/c.jpg"}"#
        );
    }
}
