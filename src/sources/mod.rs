//! Source adapters for fetching ranked articles from each outlet.
//!
//! Each adapter owns a [`reqwest::Client`] and a configurable endpoint,
//! and exposes one operation: `fetch(&SearchFilter) -> Vec<Article>`.
//! Adapters normalize whatever the outlet returns into [`Article`]s and
//! apply the filter themselves, so the aggregator can treat them
//! uniformly.
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Ranking signal |
//! |--------|--------|--------|----------------|
//! | Hacker News | [`hackernews`] | Firebase JSON API | Real points and comment counts |
//! | Reddit | [`reddit`] | Public listing JSON | Real upvotes and comment counts |
//! | TechCrunch | [`techcrunch`] | RSS feed | Fixed placeholder score |
//! | VentureBeat | [`venturebeat`] | HTML scraping | Fixed placeholder score |
//!
//! # Common Patterns
//!
//! - Endpoints are injectable (`with_base_url` and friends) so tests can
//!   point an adapter at a local mock server.
//! - Per-item breakage is logged and skipped; the batch survives.
//! - HTML and feed endpoints are fetched with a browser `User-Agent`,
//!   since several outlets reject default client strings.
//!
//! [`Article`]: crate::models::Article

pub mod hackernews;
pub mod reddit;
pub mod techcrunch;
pub mod venturebeat;

pub use hackernews::HackerNewsSource;
pub use reddit::RedditSource;
pub use techcrunch::TechCrunchSource;
pub use venturebeat::VentureBeatSource;
