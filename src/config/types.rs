use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

/// Default browser-like user agent sent with every request.
///
/// Threaded through the HTTP clients as a configuration value so a single
/// config file controls identification for crawling, scraping and downloads.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Sitepress
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub files: FilesConfig,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Crawler (discovery) behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum depth to crawl from the seed URL (0 crawls only the root)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of links recorded and followed per page
    #[serde(rename = "max-links-per-page")]
    pub max_links_per_page: usize,

    /// Maximum number of concurrent in-flight fetches
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: usize,

    /// Delay before each non-root fetch (milliseconds)
    #[serde(rename = "crawl-delay-ms")]
    pub crawl_delay_ms: u64,

    /// Whether links on sibling subdomains are eligible for traversal
    #[serde(rename = "allow-subdomains")]
    pub allow_subdomains: bool,
}

/// Scraper (path processing) behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Number of pages processed per batch
    #[serde(rename = "batch-size")]
    pub batch_size: usize,

    /// Pause between batches (milliseconds)
    #[serde(rename = "inter-batch-pause-ms")]
    pub inter_batch_pause_ms: u64,

    /// Maximum number of concurrent page-processing tasks; falls back to
    /// the crawler's max-concurrent-requests when unset
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: Option<usize>,

    /// Maximum number of concurrent file downloads
    #[serde(rename = "max-concurrent-downloads")]
    pub max_concurrent_downloads: usize,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives pages/, files/ and metadata/
    pub directory: String,
}

/// Downloadable file configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Extensions (without dot) treated as downloadable resources
    pub extensions: Vec<String>,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_links_per_page: 50,
            max_concurrent_requests: 5,
            crawl_delay_ms: 1000,
            allow_subdomains: true,
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            inter_batch_pause_ms: 500,
            max_concurrent_requests: None,
            max_concurrent_downloads: 3,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "./sitepress-output".to_string(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: [
                "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "rtf", "csv", "odt",
                "ods", "odp",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            scraper: ScraperConfig::default(),
            output: OutputConfig::default(),
            files: FilesConfig::default(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Delay applied before each non-root fetch and after each processed page
    pub fn crawl_delay(&self) -> Duration {
        Duration::from_millis(self.crawler.crawl_delay_ms)
    }

    /// Pause between scheduler batches
    pub fn inter_batch_pause(&self) -> Duration {
        Duration::from_millis(self.scraper.inter_batch_pause_ms)
    }

    /// Concurrency bound for the scheduler's page-processing tasks
    ///
    /// Its own setting when given, otherwise the crawler's bound.
    pub fn scraper_concurrency(&self) -> usize {
        self.scraper
            .max_concurrent_requests
            .unwrap_or(self.crawler.max_concurrent_requests)
    }

    /// The downloadable extension set, lowercased
    pub fn extension_set(&self) -> HashSet<String> {
        self.files
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect()
    }
}
