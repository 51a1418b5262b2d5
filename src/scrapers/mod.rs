//! Scrapers for the Bragança municipality listings.
//!
//! Both scrapers follow the same pattern:
//!
//! 1. **Fetching**: Retrieve the listing page through a [`PageSource`](crate::fetcher::PageSource)
//! 2. **Extraction**: Apply a [`Ruleset`](rules::Ruleset) to every list item
//! 3. **Filtering**: Drop items missing required fields, keep the first `limit`
//!
//! # Supported Pages
//!
//! | Page | Module | Scope | Required fields |
//! |------|--------|-------|-----------------|
//! | News listing | [`news`] | whole page | title, link |
//! | Events agenda | [`events`] | one `events_list` widget | title |
//!
//! Selector misses are expected (card markup varies) and never fail a run;
//! fetch and URL resolution failures do.

pub mod events;
pub mod news;
pub mod rules;
