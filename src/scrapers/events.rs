//! Bragança municipality events agenda scraper.
//!
//! Scrapes the [events agenda](https://www.cm-braganca.pt/visitar/agenda-de-eventos).
//! The agenda page hosts several list widgets; only the one whose container is
//! `#events_list_{id}.widget.events_list` is read. A page without that widget
//! produces an empty feed.
//!
//! Unlike news cards, events are kept without a link, and a missing date is
//! written as an empty string rather than left out.

use super::rules::{Field, Read, Ruleset};
use crate::error::FeedError;
use crate::fetcher::PageSource;
use crate::models::{EventItem, FeedResult};
use chrono::Utc;
use tracing::{debug, info, instrument};
use url::Url;

/// Page hosting the municipality's events agenda.
pub const EVENTS_ORIGIN: &str = "https://www.cm-braganca.pt/visitar/agenda-de-eventos";

/// Agenda widget read by default.
pub const DEFAULT_WIDGET_ID: u32 = 15;

/// Default number of events kept.
pub const DEFAULT_LIMIT: usize = 12;

/// Extraction rules for the events list widget `widget_id`.
pub fn ruleset(widget_id: u32) -> Result<Ruleset, FeedError> {
    Ruleset::new("ul > li")?
        .scoped_to(&format!("#events_list_{widget_id}.widget.events_list"))?
        .rule(Field::Title, ".linl_inner .title .widget_value h2", Read::Text)?
        .rule(Field::Title, ".linl_block > a.linl_overlay", Read::Attr("aria-label"))?
        .rule(Field::Link, ".linl_block > a.linl_overlay", Read::Attr("href"))?
        .rule(
            Field::DateText,
            ".linl_inner .dates .widget_value > div",
            Read::CollapsedText,
        )?
        .rule(
            Field::Image,
            ".linl_inner .thumbnail .widget_value img",
            Read::Attr("src"),
        )
}

/// Fetch the agenda at `origin` and extract up to `limit` events from widget `widget_id`.
///
/// # Errors
///
/// Same as [`get_news`](super::news::get_news): fetch and URL resolution
/// failures abort the extraction.
#[instrument(level = "info", skip(source), fields(origin = %origin))]
pub async fn get_events<S: PageSource>(
    source: &S,
    origin: &Url,
    widget_id: u32,
    limit: usize,
) -> Result<FeedResult<EventItem>, FeedError> {
    let fetched_at = Utc::now();
    let html = source.fetch_html(origin).await?;
    let items = extract_events(&html, origin, widget_id, limit)?;

    info!(count = items.len(), limit, widget_id, "Extracted events");
    Ok(FeedResult {
        widget_id: Some(widget_id),
        fetched_at,
        items,
    })
}

/// Extract events from an already fetched page.
pub fn extract_events(
    html: &str,
    origin: &Url,
    widget_id: u32,
    limit: usize,
) -> Result<Vec<EventItem>, FeedError> {
    let raw = ruleset(widget_id)?.extract(html, origin)?;
    let candidates = raw.len();

    let items: Vec<EventItem> = raw
        .into_iter()
        .filter_map(|item| {
            item.title.map(|title| EventItem {
                title,
                link: item.link,
                date_text: item.date_text.unwrap_or_default(),
                image: item.image,
            })
        })
        .take(limit)
        .collect();

    debug!(candidates, kept = items.len(), "Filtered event cards");
    Ok(items)
}
