//! Path-processing scheduler
//!
//! Given the selected pages of a discovered site, the scheduler re-visits
//! each one to render it to PDF and download its document references. Work
//! runs in fixed-size batches; within a batch every page is an independent
//! task gated by the scheduler's own semaphore. Fan-out is therefore
//! bounded twice: the batch boundary caps peak outstanding work even when
//! the semaphore is misconfigured, and it gives a natural checkpoint for
//! progress reporting and inter-batch pacing.

use crate::config::Config;
use crate::crawler::build_http_client;
use crate::render::PageRenderer;
use crate::scraper::{safe_filename, FileDownloader};
use crate::Result;
use futures::future::join_all;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use url::Url;

/// Aggregated result of one processing session
#[derive(Debug, Clone)]
pub struct SessionResult {
    /// Pages successfully rendered to PDF
    pub pages_converted: usize,
    /// Files successfully downloaded
    pub files_downloaded: usize,
    /// Error descriptions, in completion order
    pub errors: Vec<String>,
    /// Wall-clock span from scheduler start to the last settled batch
    pub total_time: Duration,
    /// Directory the session wrote into
    pub output_dir: String,
}

/// Counters and errors shared by every in-flight task of one session
///
/// Counters are increment-only and the error list append-only, so error
/// ordering reflects completion order, not submission order.
#[derive(Debug, Default)]
struct SessionTally {
    pages_converted: usize,
    files_downloaded: usize,
    errors: Vec<String>,
}

/// The path-processing scheduler
pub struct Scraper {
    config: Arc<Config>,
    client: Client,
    renderer: Arc<dyn PageRenderer>,
    downloader: FileDownloader,
    output_dir: PathBuf,
    semaphore: Semaphore,
}

impl Scraper {
    /// Creates a scheduler writing under the configured output directory
    pub fn new(config: Arc<Config>, renderer: Arc<dyn PageRenderer>) -> Result<Self> {
        let client = build_http_client(&config.user_agent)?;
        let output_dir = PathBuf::from(&config.output.directory);
        let downloader = FileDownloader::new(client.clone(), &config, &output_dir);
        let semaphore = Semaphore::new(config.scraper_concurrency());

        Ok(Self {
            config,
            client,
            renderer,
            downloader,
            output_dir,
            semaphore,
        })
    }

    /// Processes the selected pages in batches
    ///
    /// Every list entry is attempted exactly once, duplicates included;
    /// deduplication is the discovery engine's job, not the scheduler's.
    /// The progress callback fires once per settled batch. Per-page
    /// failures fold into the result; the session always completes and
    /// returns counts, even when every page failed.
    pub async fn process_paths(
        &self,
        selected: &[Url],
        progress: Option<&(dyn Fn() + Sync)>,
    ) -> SessionResult {
        let start = Instant::now();
        let tally = Mutex::new(SessionTally::default());

        tracing::info!("Starting to process {} paths", selected.len());

        let batch_size = self.config.scraper.batch_size;
        let batch_count = selected.len().div_ceil(batch_size);

        for (index, batch) in selected.chunks(batch_size).enumerate() {
            join_all(batch.iter().map(|url| self.process_single(url, &tally))).await;

            if let Some(callback) = progress {
                callback();
            }

            if index + 1 < batch_count {
                tokio::time::sleep(self.config.inter_batch_pause()).await;
            }
        }

        let tally = tally.into_inner().unwrap();
        let result = SessionResult {
            pages_converted: tally.pages_converted,
            files_downloaded: tally.files_downloaded,
            errors: tally.errors,
            total_time: start.elapsed(),
            output_dir: self.output_dir.display().to_string(),
        };

        tracing::info!(
            "Processing completed in {:.2}s: {} pages converted, {} files downloaded, {} errors",
            result.total_time.as_secs_f64(),
            result.pages_converted,
            result.files_downloaded,
            result.errors.len()
        );

        result
    }

    /// Processes one selected page
    ///
    /// Both side effects run even when one fails: a page that cannot be
    /// rendered still gets its files downloaded, and vice versa. Every
    /// failure is captured into the tally at this boundary; nothing
    /// escapes to cancel the batch.
    async fn process_single(&self, url: &Url, tally: &Mutex<SessionTally>) {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .expect("scheduler semaphore closed");

        tracing::debug!("Processing {}", url);

        if self.convert_page(url).await {
            tally.lock().unwrap().pages_converted += 1;
        } else {
            tally
                .lock()
                .unwrap()
                .errors
                .push(format!("Failed to convert {} to PDF", url));
        }

        match self.download_files_from(url).await {
            Ok(count) => tally.lock().unwrap().files_downloaded += count,
            Err(e) => tally
                .lock()
                .unwrap()
                .errors
                .push(format!("Error processing {}: {}", url, e)),
        }

        // Same pacing discipline as the discovery engine
        tokio::time::sleep(self.config.crawl_delay()).await;
    }

    /// Renders one page to `pages/<name>.pdf`; true on success
    async fn convert_page(&self, url: &Url) -> bool {
        let filename = safe_filename(url, ".pdf");
        let pages_dir = self.output_dir.join("pages");
        if let Err(e) = tokio::fs::create_dir_all(&pages_dir).await {
            tracing::warn!("Could not create {}: {}", pages_dir.display(), e);
            return false;
        }

        let target = pages_dir.join(&filename);
        if self.renderer.render_url(url, &target).await {
            tracing::info!("Converted to PDF: {}", filename);
            true
        } else {
            tracing::warn!("Failed to convert: {}", url);
            false
        }
    }

    /// Fetches one page and downloads its document references
    ///
    /// A non-2xx page fetch is not an error here; there is simply nothing
    /// to scan, so zero files are downloaded.
    async fn download_files_from(&self, url: &Url) -> std::result::Result<usize, reqwest::Error> {
        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Ok(0);
        }

        let content = response.text().await?;
        Ok(self.downloader.download_from_html(&content, url).await)
    }
}
