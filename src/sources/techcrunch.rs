//! TechCrunch source adapter.
//!
//! Reads the public RSS feed and normalizes its entries. The feed carries
//! no engagement metrics, so every item gets a fixed placeholder score and
//! a zero comment count; publication dates come from `pubDate` when that
//! parses as RFC 2822, otherwise today's date stands in and the item is
//! never excluded by the time window.

use crate::http::get_as_browser;
use crate::models::{Article, SearchFilter, SourceId, format_date, today};
use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument, warn};

const DEFAULT_FEED_URL: &str = "https://techcrunch.com/feed/";
/// Feed entries examined per call; anything past this is ignored.
const ITEM_LIMIT: usize = 30;
/// The feed exposes no vote counts; every item gets this score.
const DEFAULT_SCORE: i64 = 100;
const FEED_TIMEOUT: Duration = Duration::from_secs(15);

/// Which child of the current `<item>` is being accumulated.
#[derive(Clone, Copy)]
enum Field {
    None,
    Title,
    Link,
    PubDate,
}

/// Fetches and parses the TechCrunch RSS feed.
pub struct TechCrunchSource {
    client: Client,
    feed_url: String,
}

impl Default for TechCrunchSource {
    fn default() -> Self {
        Self::with_feed_url(DEFAULT_FEED_URL)
    }
}

impl TechCrunchSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a different feed URL. Tests use this with a local mock server.
    pub fn with_feed_url(feed_url: impl Into<String>) -> Self {
        TechCrunchSource {
            client: Client::new(),
            feed_url: feed_url.into(),
        }
    }

    /// Download the feed and normalize its entries.
    ///
    /// A non-success status is treated as "nothing published", not an
    /// error; transport failures and mangled XML propagate.
    #[instrument(level = "info", skip_all)]
    pub async fn fetch(&self, filter: &SearchFilter) -> Result<Vec<Article>, Box<dyn Error>> {
        let response = get_as_browser(&self.client, &self.feed_url, FEED_TIMEOUT).await?;
        if !response.status().is_success() {
            warn!(status = %response.status(), "Feed unavailable");
            return Ok(Vec::new());
        }
        let body = response.text().await?;
        let articles = parse_feed(&body, filter)?;
        info!(count = articles.len(), "Collected TechCrunch items");
        Ok(articles)
    }
}

/// Parse an RSS document into articles, honoring the filter.
///
/// Walks the XML event stream tracking `<item>` boundaries and accumulating
/// `title`, `link`, and `pubDate` text, CDATA included. Only the first
/// [`ITEM_LIMIT`] items are examined.
pub(crate) fn parse_feed(
    xml: &str,
    filter: &SearchFilter,
) -> Result<Vec<Article>, quick_xml::Error> {
    // Text inside an element can arrive in several runs split by entity
    // references or comments. Keep inter-run whitespace; `build_item`
    // trims the ends.
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut articles = Vec::new();
    let mut in_item = false;
    let mut field = Field::None;
    let mut title = String::new();
    let mut link = String::new();
    let mut pub_date = String::new();
    let mut items_seen = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => {
                    in_item = true;
                    field = Field::None;
                    title.clear();
                    link.clear();
                    pub_date.clear();
                }
                b"title" if in_item => field = Field::Title,
                b"link" if in_item => field = Field::Link,
                b"pubDate" if in_item => field = Field::PubDate,
                _ => field = Field::None,
            },
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" && in_item {
                    in_item = false;
                    items_seen += 1;
                    if let Some(article) = build_item(&title, &link, &pub_date, filter) {
                        articles.push(article);
                    }
                    if items_seen >= ITEM_LIMIT {
                        break;
                    }
                }
                field = Field::None;
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.decode().unwrap_or_default();
                    match field {
                        Field::Title => title.push_str(&text),
                        Field::Link => link.push_str(&text),
                        Field::PubDate => pub_date.push_str(&text),
                        Field::None => {}
                    }
                }
            }
            // Entity references arrive as their own events, split out of the
            // surrounding text runs. Unknown entities are kept verbatim.
            Ok(Event::GeneralRef(e)) => {
                if in_item {
                    let text = match e.resolve_char_ref()? {
                        Some(ch) => ch.to_string(),
                        None => {
                            let name = e.decode()?;
                            match resolve_predefined_entity(&name) {
                                Some(resolved) => resolved.to_string(),
                                None => format!("&{name};"),
                            }
                        }
                    };
                    match field {
                        Field::Title => title.push_str(&text),
                        Field::Link => link.push_str(&text),
                        Field::PubDate => pub_date.push_str(&text),
                        Field::None => {}
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    match field {
                        Field::Title => title.push_str(&text),
                        Field::Link => link.push_str(&text),
                        Field::PubDate => pub_date.push_str(&text),
                        Field::None => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e),
            _ => {}
        }
    }

    Ok(articles)
}

/// Build one article from accumulated item fields, or skip it.
fn build_item(title: &str, link: &str, pub_date: &str, filter: &SearchFilter) -> Option<Article> {
    let title = title.trim();
    let link = link.trim();
    let pub_date = pub_date.trim();
    if title.is_empty() || link.is_empty() {
        return None;
    }

    // An unparseable or absent pubDate falls back to today and is never
    // excluded by the window.
    let mut date = today();
    if !pub_date.is_empty() {
        if let Ok(published) = DateTime::parse_from_rfc2822(pub_date) {
            let published = published.with_timezone(&Utc);
            if !filter.includes(published) {
                return None;
            }
            date = format_date(published);
        }
    }

    if !filter.matches_title(title) {
        return None;
    }

    Some(Article {
        title: title.to_string(),
        url: link.to_string(),
        source: SourceId::TechCrunch.label().to_string(),
        score: DEFAULT_SCORE,
        date,
        comments: 0,
    })
}
