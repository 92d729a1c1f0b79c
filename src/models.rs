//! Core data models shared by the source adapters and the aggregator.
//!
//! This module defines the data structures that flow through the pipeline:
//! - [`Article`]: One normalized news item, whatever its origin
//! - [`SourceId`]: Identifiers for the four supported sources
//! - [`SearchFilter`]: Per-call keyword and time-window context
//! - [`parse_keywords`]: Comma-separated keyword normalization
//!
//! Dates travel as plain `YYYY-MM-DD` strings. Adapters format timestamps
//! once at the boundary so nothing downstream ever reparses them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format shared by every adapter.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A normalized news item from any source.
///
/// Scores are only comparable as a ranking key. Hacker News and Reddit carry
/// native vote counts; the feed-backed sources (TechCrunch, VentureBeat)
/// expose no engagement metric and get a fixed placeholder score instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// The article headline. Adapters skip items without a usable title.
    pub title: String,
    /// Link to the article or discussion page. May be empty for malformed
    /// source records; extraction on an empty URL yields empty content.
    pub url: String,
    /// Human-readable provenance label. Reddit items carry their community,
    /// e.g. `"Reddit r/technology"`.
    pub source: String,
    /// Ranking key. Native votes where the source has them, otherwise a
    /// fixed placeholder.
    pub score: i64,
    /// Publication date in `YYYY-MM-DD`, falling back to today when the
    /// source exposes no timestamp.
    pub date: String,
    /// Comment count where the source has one, otherwise zero.
    pub comments: i64,
}

/// Identifier for one of the supported news sources.
///
/// [`SourceId::ALL`] fixes the canonical invocation order. The aggregator's
/// score sort is stable, so articles tied on score keep this production
/// order in the merged output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    HackerNews,
    Reddit,
    TechCrunch,
    VentureBeat,
}

impl SourceId {
    /// Every source, in canonical invocation order.
    pub const ALL: [SourceId; 4] = [
        SourceId::HackerNews,
        SourceId::Reddit,
        SourceId::TechCrunch,
        SourceId::VentureBeat,
    ];

    /// Display name used in [`Article::source`] labels and listings.
    pub fn label(self) -> &'static str {
        match self {
            SourceId::HackerNews => "Hacker News",
            SourceId::Reddit => "Reddit",
            SourceId::TechCrunch => "TechCrunch",
            SourceId::VentureBeat => "VentureBeat",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceId::HackerNews => "hackernews",
            SourceId::Reddit => "reddit",
            SourceId::TechCrunch => "techcrunch",
            SourceId::VentureBeat => "venturebeat",
        };
        write!(f, "{name}")
    }
}

impl FromStr for SourceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hackernews" | "hacker-news" | "hn" => Ok(SourceId::HackerNews),
            "reddit" => Ok(SourceId::Reddit),
            "techcrunch" | "tc" => Ok(SourceId::TechCrunch),
            "venturebeat" | "vb" => Ok(SourceId::VentureBeat),
            other => Err(format!("unknown source: {other}")),
        }
    }
}

/// Keyword and time-window context for one aggregation call.
///
/// Built once per call and passed by reference to every adapter, so all
/// sources see the same cutoff instant.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    /// Lowercased, trimmed, non-empty keyword tokens in input order.
    /// Empty means no keyword filtering.
    pub keywords: Vec<String>,
    /// Items timestamped strictly before this instant are excluded by the
    /// sources that apply time filtering.
    pub cutoff: DateTime<Utc>,
}

impl SearchFilter {
    /// Build a filter from a raw comma-separated keyword string and a
    /// lookback window in days.
    ///
    /// Windows too large to represent saturate to the earliest instant,
    /// which admits everything, rather than panicking.
    pub fn new(raw_keywords: &str, timeframe_days: i64) -> Self {
        let cutoff = Duration::try_days(timeframe_days)
            .and_then(|window| Utc::now().checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        SearchFilter {
            keywords: parse_keywords(raw_keywords),
            cutoff,
        }
    }

    /// Case-insensitive substring match of any keyword against a title.
    /// Vacuously true when the keyword list is empty.
    pub fn matches_title(&self, title: &str) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let lowered = title.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    /// Whether a timestamp falls inside the window, i.e. is not strictly
    /// older than the cutoff.
    pub fn includes(&self, when: DateTime<Utc>) -> bool {
        when >= self.cutoff
    }
}

/// Normalize a comma-separated keyword string.
///
/// Splits on commas, trims each token, lowercases, and drops empty tokens.
/// Order and duplicates are preserved. Whitespace-only input yields an
/// empty list, which downstream means "no keyword filtering".
///
/// # Examples
///
/// ```
/// use newsgather::models::parse_keywords;
///
/// assert_eq!(parse_keywords("AI, Crypto"), vec!["ai", "crypto"]);
/// assert!(parse_keywords(" , ,").is_empty());
/// ```
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Format a UTC timestamp as `YYYY-MM-DD`.
pub fn format_date(when: DateTime<Utc>) -> String {
    when.format(DATE_FORMAT).to_string()
}

/// Today's date in `YYYY-MM-DD`, UTC.
pub fn today() -> String {
    format_date(Utc::now())
}
