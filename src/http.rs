//! Shared HTTP plumbing for the source adapters and the content extractor.
//!
//! Reddit's JSON listing, the TechCrunch feed, VentureBeat's category page,
//! and arbitrary article pages all refuse or throttle requests that do not
//! present a desktop browser user agent, so those requests carry
//! [`BROWSER_USER_AGENT`]. The Hacker News API has no such requirement and
//! is called with reqwest's default agent.

use reqwest::header::USER_AGENT;
use reqwest::{Client, Response};
use std::time::Duration;

/// Desktop browser user agent sent to scrape-hostile endpoints.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Issue a GET presenting the browser user agent, with a per-request timeout.
pub(crate) async fn get_as_browser(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<Response, reqwest::Error> {
    client
        .get(url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .timeout(timeout)
        .send()
        .await
}
