//! Crawler module for site discovery
//!
//! This module contains the discovery half of Sitepress:
//! - HTTP fetching with browser-like headers and a fixed request timeout
//! - HTML parsing for titles, links and downloadable file references
//! - The recursive, depth-bounded, concurrency-limited discovery engine

mod engine;
mod fetcher;
mod parser;

pub use engine::Discovery;
pub use fetcher::{build_http_client, fetch_page, CrawlOutcome};
pub use parser::{parse_page, ParsedPage};
