//! Reddit source adapter.
//!
//! Pulls top-of-week posts from a fixed set of technology communities via
//! the unauthenticated JSON listing endpoint. Communities are fetched one
//! after another with a short pause in between; a community that fails
//! (private, banned, renamed) is logged and never hides the others.
//!
//! The `t=week` listing window is the time bound here. The caller's day
//! window is not applied on top of it, so a narrower timeframe does not
//! narrow Reddit results.

use crate::http::get_as_browser;
use crate::models::{Article, SearchFilter, format_date, today};
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
/// Communities scanned on every call.
const COMMUNITIES: [&str; 4] = ["artificial", "technology", "machinelearning", "OpenAI"];
const POSTS_PER_COMMUNITY: u32 = 25;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Pause between community requests.
const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

/// One post record. `created_utc` arrives as a float in the wire format.
#[derive(Debug, Deserialize)]
struct Post {
    title: Option<String>,
    url: Option<String>,
    score: Option<i64>,
    num_comments: Option<i64>,
    created_utc: Option<f64>,
}

/// Fetches top-of-week posts from the configured Reddit communities.
pub struct RedditSource {
    client: Client,
    base_url: String,
    pause: Duration,
}

impl Default for RedditSource {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl RedditSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the adapter at a different host. Tests use this with a local
    /// mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        RedditSource {
            client: Client::new(),
            base_url: base_url.into(),
            pause: DEFAULT_PAUSE,
        }
    }

    /// Adjust the pause between community requests. Tests set it to zero.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Fetch, filter, and normalize posts from every community.
    ///
    /// Always returns `Ok`: each community's failure is contained inside
    /// the loop, so partial outages yield partial results.
    #[instrument(level = "info", skip_all)]
    pub async fn fetch(&self, filter: &SearchFilter) -> Result<Vec<Article>, Box<dyn Error>> {
        let mut articles = Vec::new();
        for (i, community) in COMMUNITIES.iter().enumerate() {
            match self.fetch_community(community, filter).await {
                Ok(mut batch) => {
                    debug!(community, count = batch.len(), "Collected community posts");
                    articles.append(&mut batch);
                }
                Err(e) => {
                    warn!(community, error = %e, "Community fetch failed; continuing");
                }
            }
            if i + 1 < COMMUNITIES.len() && !self.pause.is_zero() {
                sleep(self.pause).await;
            }
        }
        info!(count = articles.len(), "Collected Reddit posts");
        Ok(articles)
    }

    async fn fetch_community(
        &self,
        community: &str,
        filter: &SearchFilter,
    ) -> Result<Vec<Article>, Box<dyn Error>> {
        let url = format!(
            "{}/r/{}/top/.json?t=week&limit={}",
            self.base_url, community, POSTS_PER_COMMUNITY
        );
        let response = get_as_browser(&self.client, &url, REQUEST_TIMEOUT).await?;
        if !response.status().is_success() {
            warn!(community, status = %response.status(), "Community listing unavailable");
            return Ok(Vec::new());
        }
        let listing: Listing = response.json().await?;

        let mut articles = Vec::new();
        for child in listing.data.children {
            let post = child.data;
            let title = match post.title {
                Some(t) if !t.is_empty() => t,
                _ => continue,
            };
            if !filter.matches_title(&title) {
                continue;
            }
            let posted = DateTime::from_timestamp(post.created_utc.unwrap_or(0.0) as i64, 0);
            articles.push(Article {
                title,
                url: post.url.unwrap_or_default(),
                source: format!("Reddit r/{community}"),
                score: post.score.unwrap_or(0),
                date: posted.map(format_date).unwrap_or_else(today),
                comments: post.num_comments.unwrap_or(0),
            });
        }
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing_body(posts: &[serde_json::Value]) -> String {
        json!({
            "data": {
                "children": posts
                    .iter()
                    .map(|p| json!({ "data": p }))
                    .collect::<Vec<_>>()
            }
        })
        .to_string()
    }

    fn post(title: &str, score: i64, comments: i64) -> serde_json::Value {
        json!({
            "title": title,
            "url": format!("https://reddit.example/{}", title.replace(' ', "_")),
            "score": score,
            "num_comments": comments,
            "created_utc": 1_700_000_000.0
        })
    }

    fn mock_community(
        server: &mut mockito::ServerGuard,
        community: &str,
        body: String,
    ) -> mockito::Mock {
        server
            .mock("GET", format!("/r/{community}/top/.json").as_str())
            .match_query(mockito::Matcher::Any)
            .with_body(body)
    }

    #[tokio::test]
    async fn test_fetch_labels_posts_per_community() {
        let mut server = mockito::Server::new_async().await;
        mock_community(
            &mut server,
            "artificial",
            listing_body(&[post("GPT-5 rumors intensify", 4200, 318)]),
        )
        .create_async()
        .await;
        mock_community(
            &mut server,
            "technology",
            listing_body(&[post("Chip shortage easing", 950, 120)]),
        )
        .create_async()
        .await;
        mock_community(&mut server, "machinelearning", listing_body(&[]))
            .create_async()
            .await;
        mock_community(&mut server, "OpenAI", listing_body(&[]))
            .create_async()
            .await;

        let source =
            RedditSource::with_base_url(server.url()).with_pause(Duration::ZERO);
        let filter = SearchFilter::new("", 7);
        let articles = source.fetch(&filter).await.unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source, "Reddit r/artificial");
        assert_eq!(articles[0].score, 4200);
        assert_eq!(articles[0].comments, 318);
        assert_eq!(articles[0].date, "2023-11-14");
        assert_eq!(articles[1].source, "Reddit r/technology");
    }

    #[tokio::test]
    async fn test_fetch_isolates_failing_community() {
        let mut server = mockito::Server::new_async().await;
        mock_community(
            &mut server,
            "artificial",
            listing_body(&[post("Agents everywhere", 500, 60)]),
        )
        .create_async()
        .await;
        // r/technology is gone; the rest still answer.
        server
            .mock("GET", "/r/technology/top/.json")
            .match_query(mockito::Matcher::Any)
            .with_status(404)
            .create_async()
            .await;
        mock_community(&mut server, "machinelearning", listing_body(&[]))
            .create_async()
            .await;
        mock_community(
            &mut server,
            "OpenAI",
            listing_body(&[post("New model card posted", 800, 45)]),
        )
        .create_async()
        .await;

        let source =
            RedditSource::with_base_url(server.url()).with_pause(Duration::ZERO);
        let filter = SearchFilter::new("", 7);
        let articles = source.fetch(&filter).await.unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source, "Reddit r/artificial");
        assert_eq!(articles[1].source, "Reddit r/OpenAI");
    }

    #[tokio::test]
    async fn test_fetch_applies_keyword_filter_and_skips_blank_titles() {
        let mut server = mockito::Server::new_async().await;
        mock_community(
            &mut server,
            "artificial",
            listing_body(&[
                post("New AI benchmark results", 300, 20),
                post("Unrelated hardware post", 900, 10),
                json!({ "title": "", "score": 50 }),
            ]),
        )
        .create_async()
        .await;
        for community in ["technology", "machinelearning", "OpenAI"] {
            mock_community(&mut server, community, listing_body(&[]))
                .create_async()
                .await;
        }

        let source =
            RedditSource::with_base_url(server.url()).with_pause(Duration::ZERO);
        let filter = SearchFilter::new("ai", 7);
        let articles = source.fetch(&filter).await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "New AI benchmark results");
    }

    #[tokio::test]
    async fn test_fetch_defaults_missing_fields() {
        let mut server = mockito::Server::new_async().await;
        mock_community(
            &mut server,
            "artificial",
            listing_body(&[json!({ "title": "Sparse record" })]),
        )
        .create_async()
        .await;
        for community in ["technology", "machinelearning", "OpenAI"] {
            mock_community(&mut server, community, listing_body(&[]))
                .create_async()
                .await;
        }

        let source =
            RedditSource::with_base_url(server.url()).with_pause(Duration::ZERO);
        let filter = SearchFilter::new("", 7);
        let articles = source.fetch(&filter).await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, "");
        assert_eq!(articles[0].score, 0);
        assert_eq!(articles[0].comments, 0);
        assert_eq!(articles[0].date, "1970-01-01");
    }
}
