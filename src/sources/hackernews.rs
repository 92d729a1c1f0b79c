//! Hacker News source adapter.
//!
//! Talks to the public Firebase-backed API in two stages: first the
//! rank-ordered `topstories` ID listing, then one `item/{id}` detail request
//! per story. Detail requests run sequentially in rank order so that the
//! aggregator's stable sort keeps the site's own ordering for tied scores.
//!
//! # Endpoints
//!
//! - `GET {base}/topstories.json` - rank-ordered story IDs, best first
//! - `GET {base}/item/{id}.json` - one story record, JSON `null` for dead items

use crate::models::{Article, SearchFilter, SourceId, format_date};
use chrono::DateTime;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";
/// IDs kept from the ranked listing before the detail pass.
const TOP_STORIES_SCAN: usize = 100;
/// Detail requests issued per call; the listing is rank-ordered, so these
/// are the current best stories.
const STORY_DETAIL_LIMIT: usize = 30;
const LISTING_TIMEOUT: Duration = Duration::from_secs(10);
const ITEM_TIMEOUT: Duration = Duration::from_secs(5);

/// One story record from the item endpoint. Every field is optional so that
/// sparse or partially formed items deserialize instead of failing.
#[derive(Debug, Deserialize)]
struct HnItem {
    title: Option<String>,
    url: Option<String>,
    score: Option<i64>,
    time: Option<i64>,
    descendants: Option<i64>,
}

/// Fetches the current top stories from the Hacker News API.
pub struct HackerNewsSource {
    client: Client,
    base_url: String,
}

impl Default for HackerNewsSource {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl HackerNewsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the adapter at a different API root. Tests use this with a
    /// local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        HackerNewsSource {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch, filter, and normalize the current top stories.
    ///
    /// Stage one downloads the ranked ID listing; stage two fetches story
    /// details for the first `STORY_DETAIL_LIMIT` IDs in listing order.
    /// Individual story failures are logged and skipped; a listing failure
    /// fails the whole call.
    #[instrument(level = "info", skip_all)]
    pub async fn fetch(&self, filter: &SearchFilter) -> Result<Vec<Article>, Box<dyn Error>> {
        let listing_url = format!("{}/topstories.json", self.base_url);
        let ids: Vec<u64> = self
            .client
            .get(&listing_url)
            .timeout(LISTING_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let ids: Vec<u64> = ids.into_iter().take(TOP_STORIES_SCAN).collect();
        debug!(count = ids.len(), "Listed top story IDs");

        let articles: Vec<Article> = stream::iter(ids.into_iter().take(STORY_DETAIL_LIMIT))
            .then(|id| async move { self.fetch_story(id, filter).await })
            .filter_map(|story| std::future::ready(story))
            .collect()
            .await;

        info!(count = articles.len(), "Collected Hacker News stories");
        Ok(articles)
    }

    /// Fetch one story and apply the filter. Any per-story failure yields
    /// `None` so siblings keep flowing.
    #[instrument(level = "debug", skip(self, filter))]
    async fn fetch_story(&self, id: u64, filter: &SearchFilter) -> Option<Article> {
        let item_url = format!("{}/item/{}.json", self.base_url, id);
        let payload: Option<HnItem> = match self
            .client
            .get(&item_url)
            .timeout(ITEM_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => match response.json().await {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(id, error = %e, "Story payload did not parse; skipping");
                    return None;
                }
            },
            Err(e) => {
                warn!(id, error = %e, "Story fetch failed; skipping");
                return None;
            }
        };

        // The API answers `null` for dead or withdrawn items.
        let item = match payload {
            Some(item) => item,
            None => {
                debug!(id, "Story is dead or missing; skipping");
                return None;
            }
        };
        let title = match item.title {
            Some(t) if !t.is_empty() => t,
            _ => {
                debug!(id, "Story has no title; skipping");
                return None;
            }
        };

        // Missing timestamps count as ancient, so they fall out of any window.
        let posted = DateTime::from_timestamp(item.time.unwrap_or(0), 0)?;
        if !filter.includes(posted) {
            debug!(id, "Story is older than the window; skipping");
            return None;
        }
        if !filter.matches_title(&title) {
            return None;
        }

        Some(Article {
            title,
            url: item
                .url
                .unwrap_or_else(|| format!("https://news.ycombinator.com/item?id={id}")),
            source: SourceId::HackerNews.label().to_string(),
            score: item.score.unwrap_or(0),
            date: format_date(posted),
            comments: item.descendants.unwrap_or(0),
        })
    }
}
