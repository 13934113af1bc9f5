//! URL handling module for Sitepress
//!
//! This module provides reference resolution, validity checks, same-domain
//! comparison, and file-extension based classification of downloadable
//! resources. Everything here is a pure function; malformed input is
//! dropped, never propagated as an error.

mod domain;
mod extension;
mod resolve;

pub use domain::is_same_domain;
pub use extension::{extension, is_downloadable};
pub use resolve::resolve;

use url::Url;

/// Returns true if the URL is eligible for crawling
///
/// A URL is valid when its scheme is http or https and it carries a host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitepress::url::is_valid;
///
/// assert!(is_valid(&Url::parse("https://example.com/page").unwrap()));
/// assert!(!is_valid(&Url::parse("ftp://example.com/file").unwrap()));
/// ```
pub fn is_valid(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_and_https_are_valid() {
        assert!(is_valid(&Url::parse("http://example.com/").unwrap()));
        assert!(is_valid(&Url::parse("https://example.com/").unwrap()));
    }

    #[test]
    fn test_other_schemes_are_invalid() {
        assert!(!is_valid(&Url::parse("ftp://example.com/").unwrap()));
        assert!(!is_valid(&Url::parse("file:///tmp/page.html").unwrap()));
        assert!(!is_valid(&Url::parse("mailto:user@example.com").unwrap()));
    }

    #[test]
    fn test_hostless_url_is_invalid() {
        // "data:" and friends never carry a network location
        assert!(!is_valid(&Url::parse("data:text/html,hello").unwrap()));
    }
}
