//! # newsgather
//!
//! A news discovery pipeline that pulls stories from several tech
//! outlets at once, filters them by keyword and recency, and merges the
//! survivors into one list ranked by engagement score. A companion
//! extractor pulls readable article text from an arbitrary URL on a
//! best-effort basis.
//!
//! ## Features
//!
//! - Fetches from four sources: Hacker News (Firebase API), Reddit
//!   (public listing JSON), TechCrunch (RSS), and VentureBeat (HTML)
//! - Case-insensitive keyword filtering and a configurable recency
//!   window, applied uniformly across sources
//! - Score-ranked merge; sources without real engagement numbers carry a
//!   fixed placeholder score
//! - Per-source failure isolation: one outlet breaking never empties the
//!   run, and [`AggregateReport`] says who contributed what
//! - Best-effort article text extraction with boilerplate stripping
//!
//! ## Usage
//!
//! ```no_run
//! use newsgather::{NewsAggregator, SourceId};
//! use std::collections::HashSet;
//!
//! # async fn run() {
//! let aggregator = NewsAggregator::new();
//! let selected: HashSet<SourceId> = SourceId::ALL.into_iter().collect();
//! let articles = aggregator.aggregate("ai, rust", 7, &selected).await;
//! for article in articles.iter().take(10) {
//!     println!("{} ({})", article.title, article.source);
//! }
//! # }
//! ```
//!
//! ## Architecture
//!
//! The pipeline runs in three stages:
//! 1. **Fetch**: each selected source adapter pulls and normalizes its
//!    outlet's items into [`Article`]s, applying the shared filter
//! 2. **Merge**: batches are concatenated in canonical source order and
//!    stably sorted by score descending
//! 3. **Extract** (on demand): [`extract_article_content`] fetches a URL
//!    and digs readable paragraph text out of the page

pub mod aggregator;
pub mod extractor;
pub mod http;
pub mod models;
pub mod sources;

pub use aggregator::{AggregateReport, NewsAggregator, SourceReport};
pub use extractor::extract_article_content;
pub use models::{Article, SearchFilter, SourceId};
