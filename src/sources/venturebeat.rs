//! VentureBeat source adapter.
//!
//! Scrapes the AI category page. There is no feed or API here, so this is
//! the brittlest source: when the markup drifts the selector cascade finds
//! nothing and the adapter yields zero articles rather than failing.
//!
//! # Markup expectations
//!
//! Article cards are `<article>` elements. The headline is looked up as
//! `h2.article-title`, then any `h3`, then any `h2`, and the first `<a>`
//! inside the winning heading supplies both title text and link.

use crate::http::get_as_browser;
use crate::models::{Article, SearchFilter, SourceId, today};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

const DEFAULT_PAGE_URL: &str = "https://venturebeat.com/category/ai/";
/// Article cards examined per call.
const ARTICLE_LIMIT: usize = 20;
/// The page exposes no vote counts; every item gets this score.
const DEFAULT_SCORE: i64 = 100;
const PAGE_TIMEOUT: Duration = Duration::from_secs(15);

static ARTICLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
/// Headline lookups in preference order.
static HEADING_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    vec![
        Selector::parse("h2.article-title").unwrap(),
        Selector::parse("h3").unwrap(),
        Selector::parse("h2").unwrap(),
    ]
});
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Scrapes the VentureBeat AI category page.
pub struct VentureBeatSource {
    client: Client,
    page_url: String,
}

impl Default for VentureBeatSource {
    fn default() -> Self {
        Self::with_page_url(DEFAULT_PAGE_URL)
    }
}

impl VentureBeatSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scrape a different category page. Tests use this with a local mock
    /// server.
    pub fn with_page_url(page_url: impl Into<String>) -> Self {
        VentureBeatSource {
            client: Client::new(),
            page_url: page_url.into(),
        }
    }

    /// Download the category page and scrape its article cards.
    ///
    /// A non-success status is treated as "nothing published", not an
    /// error; transport failures propagate.
    #[instrument(level = "info", skip_all)]
    pub async fn fetch(&self, filter: &SearchFilter) -> Result<Vec<Article>, Box<dyn Error>> {
        let response = get_as_browser(&self.client, &self.page_url, PAGE_TIMEOUT).await?;
        if !response.status().is_success() {
            warn!(status = %response.status(), "Category page unavailable");
            return Ok(Vec::new());
        }
        let body = response.text().await?;
        let articles = parse_page(&body, &self.page_url, filter);
        info!(count = articles.len(), "Collected VentureBeat articles");
        Ok(articles)
    }
}

/// Scrape article cards out of a category page, honoring the filter.
///
/// Relative links are resolved against `page_url`; absolute links pass
/// through unchanged. Cards missing a heading, an anchor, title text, or an
/// `href` are skipped.
pub(crate) fn parse_page(html: &str, page_url: &str, filter: &SearchFilter) -> Vec<Article> {
    let document = Html::parse_document(html);
    let base_url = Url::parse(page_url).ok();

    let mut articles = Vec::new();
    for element in document.select(&ARTICLE_SELECTOR).take(ARTICLE_LIMIT) {
        let heading = match HEADING_SELECTORS
            .iter()
            .find_map(|selector| element.select(selector).next())
        {
            Some(heading) => heading,
            None => {
                debug!("Card without a recognizable heading; skipping");
                continue;
            }
        };
        let anchor = match heading.select(&ANCHOR_SELECTOR).next() {
            Some(anchor) => anchor,
            None => continue,
        };

        let title = anchor
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if title.is_empty() {
            continue;
        }
        if !filter.matches_title(&title) {
            continue;
        }

        let href = match anchor.value().attr("href") {
            Some(href) if !href.is_empty() => href,
            _ => continue,
        };

        articles.push(Article {
            title,
            url: resolve_href(base_url.as_ref(), href),
            source: SourceId::VentureBeat.label().to_string(),
            score: DEFAULT_SCORE,
            date: today(),
            comments: 0,
        });
    }
    articles
}

/// Resolve an href against the page URL, falling back to the raw value
/// when either side refuses to parse.
fn resolve_href(base_url: Option<&Url>, href: &str) -> String {
    if let Some(base) = base_url {
        if let Ok(resolved) = base.join(href) {
            return resolved.to_string();
        }
    }
    href.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://venturebeat.com/category/ai/";

    fn page(cards: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html><head><title>AI | VentureBeat</title></head>
<body><main>{cards}</main></body></html>"#
        )
    }

    #[test]
    fn test_parse_page_reads_article_title_class() {
        let html = page(
            r#"<article>
  <h2 class="article-title"><a href="https://venturebeat.com/ai/model-news/">Model news of the day</a></h2>
</article>"#,
        );
        let filter = SearchFilter::new("", 7);
        let articles = parse_page(&html, PAGE_URL, &filter);

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Model news of the day");
        assert_eq!(articles[0].url, "https://venturebeat.com/ai/model-news/");
        assert_eq!(articles[0].source, "VentureBeat");
        assert_eq!(articles[0].score, 100);
        assert_eq!(articles[0].comments, 0);
        assert_eq!(articles[0].date, today());
    }

    #[test]
    fn test_parse_page_falls_back_to_generic_headings() {
        let html = page(
            r#"<article><h2><a href="https://x.example/post">Feature X launches</a></h2></article>"#,
        );
        let filter = SearchFilter::new("", 7);
        let articles = parse_page(&html, PAGE_URL, &filter);

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Feature X launches");
        assert_eq!(articles[0].url, "https://x.example/post");
        assert_eq!(articles[0].score, 100);
        assert_eq!(articles[0].date, today());
    }

    #[test]
    fn test_parse_page_prefers_titled_heading_over_h3_over_h2() {
        let html = page(
            r#"<article>
  <h2><a href="/generic">Generic heading</a></h2>
  <h3><a href="/subhead">Subheading wins here</a></h3>
</article>
<article>
  <h3><a href="/other-sub">Plain subheading</a></h3>
  <h2 class="article-title"><a href="/titled">Titled heading wins here</a></h2>
</article>"#,
        );
        let filter = SearchFilter::new("", 7);
        let articles = parse_page(&html, PAGE_URL, &filter);

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Subheading wins here");
        assert_eq!(articles[1].title, "Titled heading wins here");
    }

    #[test]
    fn test_parse_page_resolves_relative_links() {
        let html = page(
            r#"<article><h2><a href="/2025/08/agents-at-work/">Agents at work</a></h2></article>"#,
        );
        let filter = SearchFilter::new("", 7);
        let articles = parse_page(&html, PAGE_URL, &filter);

        assert_eq!(articles.len(), 1);
        assert_eq!(
            articles[0].url,
            "https://venturebeat.com/2025/08/agents-at-work/"
        );
    }

    #[test]
    fn test_parse_page_skips_malformed_cards() {
        let html = page(
            r#"<article><p>No heading at all</p></article>
<article><h2>Heading without anchor</h2></article>
<article><h2><a href="/empty-title"> </a></h2></article>
<article><h2><a>No href</a></h2></article>
<article><h2><a href="">Empty href</a></h2></article>
<article><h2><a href="/ok">Survivor</a></h2></article>"#,
        );
        let filter = SearchFilter::new("", 7);
        let articles = parse_page(&html, PAGE_URL, &filter);

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Survivor");
    }

    #[test]
    fn test_parse_page_applies_keyword_filter() {
        let html = page(
            r#"<article><h2><a href="/a">AI agents roundup</a></h2></article>
<article><h2><a href="/b">Gaming hardware review</a></h2></article>"#,
        );
        let filter = SearchFilter::new("ai", 7);
        let articles = parse_page(&html, PAGE_URL, &filter);

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "AI agents roundup");
    }

    #[test]
    fn test_parse_page_respects_article_limit() {
        let cards: String = (0..25)
            .map(|i| format!(r#"<article><h2><a href="/{i}">Card {i}</a></h2></article>"#))
            .collect();
        let filter = SearchFilter::new("", 7);
        let articles = parse_page(&page(&cards), PAGE_URL, &filter);

        assert_eq!(articles.len(), 20);
        assert_eq!(articles[19].title, "Card 19");
    }

    #[test]
    fn test_parse_page_handles_drifted_markup() {
        let html = page(r#"<div class="new-layout">A redesign with no article tags</div>"#);
        let filter = SearchFilter::new("", 7);
        assert!(parse_page(&html, PAGE_URL, &filter).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_returns_empty_when_page_unavailable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/category/ai/")
            .with_status(500)
            .create_async()
            .await;

        let source =
            VentureBeatSource::with_page_url(format!("{}/category/ai/", server.url()));
        let filter = SearchFilter::new("", 7);
        assert!(source.fetch(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_scrapes_live_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/category/ai/")
            .match_header("user-agent", crate::http::BROWSER_USER_AGENT)
            .with_body(page(
                r#"<article><h2><a href="/wired-up">Wired up</a></h2></article>"#,
            ))
            .create_async()
            .await;

        let page_url = format!("{}/category/ai/", server.url());
        let source = VentureBeatSource::with_page_url(page_url.clone());
        let filter = SearchFilter::new("", 7);
        let articles = source.fetch(&filter).await.unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, format!("{}/wired-up", server.url()));
        mock.assert_async().await;
    }
}
