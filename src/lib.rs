//! Sitepress: a site-to-PDF press
//!
//! This crate discovers the reachable structure of a website (pages, links,
//! downloadable files) with a depth-bounded, concurrency-limited crawl, then
//! schedules the selected pages for processing: rendering each page to PDF
//! and downloading the document files it references.

pub mod config;
pub mod crawler;
pub mod graph;
pub mod output;
pub mod render;
pub mod scraper;
pub mod url;

use thiserror::Error;

/// Main error type for Sitepress operations
#[derive(Debug, Error)]
pub enum SitepressError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid seed URL: {0}")]
    InvalidSeed(String),

    #[error("No PDF render backend available: {0}")]
    NoRenderBackend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report error: {0}")]
    Report(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Sitepress operations
pub type Result<T> = std::result::Result<T, SitepressError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlOutcome, Discovery};
pub use graph::{FileRef, PageRecord, SiteGraph};
pub use scraper::{Scraper, SessionResult};
