//! Scraper module for path processing
//!
//! The processing half of Sitepress: given the selected pages of a
//! discovered site, render each one to PDF and download the document files
//! it references, in batches, under the same concurrency discipline as the
//! discovery engine.

mod downloader;
mod scheduler;

pub use downloader::FileDownloader;
pub use scheduler::{Scraper, SessionResult};

use url::Url;

/// Characters never allowed in generated filenames
const INVALID_FILENAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Builds a filesystem-safe filename from a URL
///
/// Joins domain and path with separators flattened to underscores, strips
/// characters that are invalid on common filesystems, caps the length and
/// appends the extension when missing.
pub(crate) fn safe_filename(url: &Url, extension: &str) -> String {
    let domain = url
        .host_str()
        .unwrap_or("page")
        .trim_start_matches("www.")
        .to_string();

    let path = url.path().trim_matches('/');
    let mut filename = if path.is_empty() {
        domain
    } else {
        format!("{}_{}", domain, path.replace(['/', '\\'], "_"))
    };

    filename = filename
        .chars()
        .map(|c| {
            if INVALID_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    if filename.len() > 100 {
        filename.truncate(100);
    }

    if !extension.is_empty() && !filename.ends_with(extension) {
        filename.push_str(extension);
    }

    filename
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_safe_filename_root() {
        assert_eq!(
            safe_filename(&url("https://example.com/"), ".pdf"),
            "example.com.pdf"
        );
    }

    #[test]
    fn test_safe_filename_strips_www() {
        assert_eq!(
            safe_filename(&url("https://www.example.com/docs/guide"), ".pdf"),
            "example.com_docs_guide.pdf"
        );
    }

    #[test]
    fn test_safe_filename_replaces_invalid_chars() {
        let name = safe_filename(&url("https://example.com/a?b=c"), ".pdf");
        assert!(!name.contains(['?', '/', ':']));
    }

    #[test]
    fn test_safe_filename_caps_length() {
        let long = format!("https://example.com/{}", "segment/".repeat(40));
        let name = safe_filename(&url(&long), "");
        assert!(name.len() <= 100);
    }
}
