//! Output generation for the scraped feeds.
//!
//! # Submodules
//!
//! - [`json`]: Writes each [`FeedResult`](crate::models::FeedResult) to a JSON file
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── news.json     # FeedResult<NewsItem>
//! └── events.json   # FeedResult<EventItem>, with widgetId
//! ```

pub mod json;
