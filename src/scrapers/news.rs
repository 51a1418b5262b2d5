//! Bragança municipality news listing scraper.
//!
//! Scrapes the [news listing](https://www.cm-braganca.pt/servicos-e-informacoes/noticias).
//! Each news card is a `<li>` directly under a `<ul>`, covered by an overlay
//! anchor (`a.linl_overlay`) carrying the article link.
//!
//! # Field Sources
//!
//! | Field | Selector | Fallback |
//! |-------|----------|----------|
//! | title | `.title .widget_value h2, h2` | overlay `aria-label` |
//! | link | `a.linl_overlay[href]` | |
//! | dateText | `.date .widget_value, .dates .widget_value, time` | none (omitted) |
//! | image | `.thumbnail img[src]` | |
//!
//! Cards without both a title and a link are skipped.

use super::rules::{Field, Read, Ruleset};
use crate::error::FeedError;
use crate::fetcher::PageSource;
use crate::models::{FeedResult, NewsItem};
use chrono::Utc;
use tracing::{debug, info, instrument};
use url::Url;

/// Page listing the municipality's news.
pub const NEWS_ORIGIN: &str = "https://www.cm-braganca.pt/servicos-e-informacoes/noticias";

/// Default number of news items kept.
pub const DEFAULT_LIMIT: usize = 12;

/// Extraction rules for the news listing markup.
pub fn ruleset() -> Result<Ruleset, FeedError> {
    Ruleset::new("ul > li")?
        .rule(Field::Title, ".title .widget_value h2, h2", Read::Text)?
        .rule(Field::Title, "a.linl_overlay", Read::Attr("aria-label"))?
        .rule(Field::Link, "a.linl_overlay", Read::Attr("href"))?
        .rule(
            Field::DateText,
            ".date .widget_value, .dates .widget_value, time",
            Read::CollapsedText,
        )?
        .rule(Field::Image, ".thumbnail img", Read::Attr("src"))
}

/// Fetch the news listing at `origin` and extract up to `limit` items.
///
/// # Returns
///
/// A [`FeedResult`] stamped with the time this function was entered, items in
/// document order.
///
/// # Errors
///
/// Fetch failures (timeout, HTTP status, network) and URL resolution
/// failures abort the whole extraction; no partial result is returned.
#[instrument(level = "info", skip(source), fields(origin = %origin))]
pub async fn get_news<S: PageSource>(
    source: &S,
    origin: &Url,
    limit: usize,
) -> Result<FeedResult<NewsItem>, FeedError> {
    let fetched_at = Utc::now();
    let html = source.fetch_html(origin).await?;
    let items = extract_news(&html, origin, limit)?;

    info!(count = items.len(), limit, "Extracted news items");
    Ok(FeedResult {
        widget_id: None,
        fetched_at,
        items,
    })
}

/// Extract news items from an already fetched page.
pub fn extract_news(html: &str, origin: &Url, limit: usize) -> Result<Vec<NewsItem>, FeedError> {
    let raw = ruleset()?.extract(html, origin)?;
    let candidates = raw.len();

    let items: Vec<NewsItem> = raw
        .into_iter()
        .filter_map(|item| match (item.title, item.link) {
            (Some(title), Some(link)) => Some(NewsItem {
                title,
                link,
                date_text: item.date_text,
                image: item.image,
            }),
            _ => None,
        })
        .take(limit)
        .collect();

    debug!(candidates, kept = items.len(), "Filtered news cards");
    Ok(items)
}
