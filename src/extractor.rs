//! Best-effort extraction of an article's main text from its page.
//!
//! The extractor never fails: bad URLs, transport errors, hostile status
//! codes, and unrecognizable markup all degrade to an empty string. Parsing
//! looks for a main-content container first (`article`, common content
//! class fragments, then `main`) and joins its paragraph text; pages with
//! no recognizable container fall back to the first few paragraphs found
//! anywhere outside the page chrome.

use crate::http::get_as_browser;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Upper bound on returned content, in characters.
const CONTENT_CAP: usize = 5000;
/// Paragraphs taken in the page-wide fallback scan.
const FALLBACK_PARAGRAPHS: usize = 15;
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Page chrome whose text never belongs to the article body.
const NOISE_TAGS: [&str; 6] = ["script", "style", "nav", "footer", "aside", "header"];

/// Main-content container lookups in preference order.
static CONTENT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        "article",
        r#"[class*="article-content"]"#,
        r#"[class*="post-content"]"#,
        r#"[class*="entry-content"]"#,
        r#"[class*="story-body"]"#,
        "main",
    ]
    .iter()
    .map(|selector| Selector::parse(selector).unwrap())
    .collect()
});
static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Fetch a page and extract its main article text.
///
/// Returns an empty string for blank URLs, failed requests, non-success
/// statuses, and pages where no text can be found. Never returns an error.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn extract_article_content(url: &str) -> String {
    if url.trim().is_empty() {
        debug!("Blank URL; nothing to extract");
        return String::new();
    }

    let client = Client::new();
    let response = match get_as_browser(&client, url, FETCH_TIMEOUT).await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "Article fetch failed");
            return String::new();
        }
    };
    if !response.status().is_success() {
        warn!(status = %response.status(), "Article page unavailable");
        return String::new();
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "Article body unreadable");
            return String::new();
        }
    };

    let content = extract_from_html(&body);
    info!(chars = content.chars().count(), "Extracted article content");
    content
}

/// Pull article text out of already-fetched HTML.
///
/// The first container matched by [`CONTENT_SELECTORS`] that sits outside
/// the page chrome wins; when it holds no paragraph text, or no container
/// matches, the page-wide fallback takes the first
/// [`FALLBACK_PARAGRAPHS`] paragraphs instead.
pub(crate) fn extract_from_html(html: &str) -> String {
    let document = Html::parse_document(html);

    for selector in CONTENT_SELECTORS.iter() {
        let container = document
            .select(selector)
            .find(|candidate| !inside_noise(*candidate));
        if let Some(container) = container {
            let text = joined_paragraph_text(
                container
                    .select(&PARAGRAPH_SELECTOR)
                    .filter(|p| !inside_noise(*p)),
            );
            if !text.is_empty() {
                return cap(&text);
            }
            // The container matched but held no paragraph text; scan the
            // whole page instead of trying weaker selectors.
            break;
        }
    }

    let text = joined_paragraph_text(
        document
            .select(&PARAGRAPH_SELECTOR)
            .filter(|p| !inside_noise(*p))
            .take(FALLBACK_PARAGRAPHS),
    );
    cap(&text)
}

/// Join the normalized text of each non-empty paragraph with single spaces.
fn joined_paragraph_text<'a>(paragraphs: impl Iterator<Item = ElementRef<'a>>) -> String {
    let mut parts: Vec<String> = Vec::new();
    for paragraph in paragraphs {
        let text = paragraph_text(paragraph);
        if !text.is_empty() {
            parts.push(text);
        }
    }
    parts.join(" ")
}

/// Whitespace-collapsed text of one paragraph, noise descendants excluded.
fn paragraph_text(paragraph: ElementRef) -> String {
    let mut raw = String::new();
    collect_text(paragraph, &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if !is_noise(child_element) {
                collect_text(child_element, out);
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

fn is_noise(element: ElementRef) -> bool {
    NOISE_TAGS.contains(&element.value().name())
}

/// Whether any ancestor is a chrome element.
fn inside_noise(element: ElementRef) -> bool {
    element.ancestors().filter_map(ElementRef::wrap).any(is_noise)
}

fn cap(text: &str) -> String {
    text.chars().take(CONTENT_CAP).collect()
}
