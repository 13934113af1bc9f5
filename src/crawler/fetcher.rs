//! HTTP fetcher for the discovery engine
//!
//! One fetch attempt produces one [`CrawlOutcome`]: page metadata on
//! success, a captured error string otherwise. Ordinary HTTP error statuses
//! are reported as unsuccessful outcomes, never raised; traversal keeps
//! going around a bad page.

use crate::crawler::parser::parse_page;
use crate::graph::FileRef;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Result of fetching and parsing one page
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// The URL that was fetched
    pub url: Url,
    /// Page title, falling back to the last path segment
    pub title: String,
    /// Followable links in scan order, deduplicated
    pub links: Vec<Url>,
    /// Downloadable file references found on the page
    pub files: Vec<FileRef>,
    /// Depth at which the fetch was attempted
    pub depth: u32,
    /// Whether the fetch and parse succeeded
    pub success: bool,
    /// Error description when `success` is false
    pub error: Option<String>,
}

impl CrawlOutcome {
    fn failure(url: Url, depth: u32, error: String) -> Self {
        Self {
            url,
            title: String::new(),
            links: Vec::new(),
            files: Vec::new(),
            depth,
            success: false,
            error: Some(error),
        }
    }
}

/// Builds an HTTP client with browser-like headers and a fixed timeout
///
/// The user agent is a configuration value threaded through every fetch,
/// shared by the discovery engine, the scheduler and the downloader.
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

    Client::builder()
        .user_agent(user_agent.to_string())
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page and parses it into a [`CrawlOutcome`]
///
/// Non-2xx statuses, network errors and body-read failures all produce an
/// unsuccessful outcome with a descriptive error string.
pub async fn fetch_page(
    client: &Client,
    url: &Url,
    depth: u32,
    extensions: &HashSet<String>,
) -> CrawlOutcome {
    tracing::debug!("Crawling {} (depth {})", url, depth);

    let response = match client.get(url.clone()).send().await {
        Ok(r) => r,
        Err(e) => return CrawlOutcome::failure(url.clone(), depth, e.to_string()),
    };

    let status = response.status();
    if !status.is_success() {
        return CrawlOutcome::failure(url.clone(), depth, format!("HTTP {}", status.as_u16()));
    }

    let body = match response.text().await {
        Ok(b) => b,
        Err(e) => return CrawlOutcome::failure(url.clone(), depth, e.to_string()),
    };

    let parsed = parse_page(&body, url, extensions);

    CrawlOutcome {
        title: parsed.title.unwrap_or_else(|| fallback_title(url)),
        links: parsed.links,
        files: parsed.files,
        url: url.clone(),
        depth,
        success: true,
        error: None,
    }
}

/// Title stand-in for pages without a usable <title>: the last path segment
fn fallback_title(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(|s| s.to_string())
        .unwrap_or_else(|| url.as_str().to_string())
}
