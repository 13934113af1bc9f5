//! File downloader for document references
//!
//! Streams downloadable resources to disk under `files/<type>/`, skipping
//! destinations that already exist non-empty, deduplicating by URL across
//! the whole session, and writing a JSON metadata sidecar next to every
//! downloaded file.

use crate::config::Config;
use crate::crawler::parse_page;
use crate::graph::FileRef;
use crate::scraper::safe_filename;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;
use url::Url;

/// Sidecar metadata written next to each downloaded file
#[derive(Debug, Serialize)]
struct FileMetadata<'a> {
    original_url: &'a str,
    source_page: &'a str,
    link_text: Option<&'a str>,
    file_type: &'a str,
    download_time: DateTime<Utc>,
    file_size: u64,
}

/// Downloads document files referenced by pages
pub struct FileDownloader {
    client: Client,
    extensions: HashSet<String>,
    files_dir: PathBuf,
    semaphore: Semaphore,
    downloaded: Mutex<HashSet<String>>,
}

impl FileDownloader {
    /// Creates a downloader writing under `<output>/files/`
    pub fn new(client: Client, config: &Config, output_dir: &Path) -> Self {
        Self {
            client,
            extensions: config.extension_set(),
            files_dir: output_dir.join("files"),
            semaphore: Semaphore::new(config.scraper.max_concurrent_downloads),
            downloaded: Mutex::new(HashSet::new()),
        }
    }

    /// Downloads every supported file referenced by the given markup
    ///
    /// Returns the number of confirmed-successful downloads. Individual
    /// failures are logged and skipped, never propagated.
    pub async fn download_from_html(&self, html: &str, base_url: &Url) -> usize {
        let files = parse_page(html, base_url, &self.extensions).files;
        if files.is_empty() {
            return 0;
        }

        tracing::info!("Found {} downloadable files on {}", files.len(), base_url);

        let results = join_all(
            files
                .iter()
                .map(|file| self.download_single(file, base_url)),
        )
        .await;

        results.into_iter().filter(|ok| *ok).count()
    }

    /// Downloads one file reference; true only on confirmed success
    ///
    /// The session-wide URL claim happens before the transfer, so the same
    /// file referenced from several pages is fetched at most once per run.
    async fn download_single(&self, file: &FileRef, source: &Url) -> bool {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .expect("download semaphore closed");

        if !self.downloaded.lock().unwrap().insert(file.url.clone()) {
            return false;
        }

        let Ok(url) = Url::parse(&file.url) else {
            return false;
        };

        let filename = file_name_for(&url, &file.kind);
        let target_dir = self.files_dir.join(&file.kind);
        if let Err(e) = tokio::fs::create_dir_all(&target_dir).await {
            tracing::warn!("Could not create {}: {}", target_dir.display(), e);
            return false;
        }
        let target = target_dir.join(&filename);

        // An existing non-empty destination counts as already downloaded
        if let Ok(meta) = tokio::fs::metadata(&target).await {
            if meta.len() > 0 {
                tracing::debug!("File already exists: {}", filename);
                return true;
            }
        }

        match self.stream_to_disk(&url, &target).await {
            Ok(size) if size > 0 => {
                tracing::info!("Downloaded {} ({} bytes)", filename, size);
                self.write_metadata(file, source, &target, size).await;
                true
            }
            Ok(_) => {
                tracing::warn!("Download produced an empty file: {}", filename);
                false
            }
            Err(e) => {
                tracing::warn!("Error downloading {}: {}", file.url, e);
                false
            }
        }
    }

    /// Streams a remote resource to disk, returning the byte count
    async fn stream_to_disk(&self, url: &Url, target: &Path) -> anyhow::Result<u64> {
        let mut response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("HTTP {}", response.status().as_u16());
        }

        let mut out = tokio::fs::File::create(target).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            out.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        out.flush().await?;

        Ok(written)
    }

    /// Writes the JSON metadata sidecar; failure here is never fatal
    async fn write_metadata(&self, file: &FileRef, source: &Url, target: &Path, size: u64) {
        let metadata = FileMetadata {
            original_url: &file.url,
            source_page: source.as_str(),
            link_text: file.link_text.as_deref(),
            file_type: &file.kind,
            download_time: Utc::now(),
            file_size: size,
        };

        let sidecar = target.with_extension(format!("{}.meta", file.kind));
        match serde_json::to_string_pretty(&metadata) {
            Ok(json) => {
                if let Err(e) = tokio::fs::write(&sidecar, json).await {
                    tracing::debug!("Could not save metadata for {}: {}", target.display(), e);
                }
            }
            Err(e) => tracing::debug!("Could not serialize metadata: {}", e),
        }
    }
}

/// Picks a filename for a downloaded file
///
/// Prefers the URL's own filename when the last path segment carries an
/// extension; otherwise derives one from the domain and path.
fn file_name_for(url: &Url, kind: &str) -> String {
    if let Some(segment) = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
    {
        if segment.contains('.') {
            return segment.to_string();
        }
    }

    safe_filename(url, &format!(".{}", kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_file_name_from_path_segment() {
        assert_eq!(
            file_name_for(&url("https://example.com/docs/report.pdf"), "pdf"),
            "report.pdf"
        );
    }

    #[test]
    fn test_file_name_derived_when_no_extension_in_path() {
        assert_eq!(
            file_name_for(&url("https://example.com/download"), "pdf"),
            "example.com_download.pdf"
        );
    }

    #[test]
    fn test_file_name_ignores_trailing_slash() {
        assert_eq!(
            file_name_for(&url("https://example.com/a/b.csv/"), "csv"),
            "b.csv"
        );
    }
}
