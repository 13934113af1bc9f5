use std::collections::HashSet;
use url::Url;

/// Extracts the lowercase file extension from a URL's path
///
/// Query string and fragment never participate; the `Url` type already
/// excludes them from `path()`. Returns an empty string when the path has
/// no `.`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitepress::url::extension;
///
/// let url = Url::parse("https://example.com/report.PDF?version=2#p3").unwrap();
/// assert_eq!(extension(&url), "pdf");
///
/// let url = Url::parse("https://example.com/about").unwrap();
/// assert_eq!(extension(&url), "");
/// ```
pub fn extension(url: &Url) -> String {
    let path = url.path().to_lowercase();
    match path.rsplit_once('.') {
        Some((_, ext)) if !ext.contains('/') => ext.to_string(),
        _ => String::new(),
    }
}

/// Returns true if the URL points at a downloadable resource
///
/// Membership test of the URL's extension against the configured set of
/// lowercase extensions (without dots).
pub fn is_downloadable(url: &Url, extensions: &HashSet<String>) -> bool {
    let ext = extension(url);
    !ext.is_empty() && extensions.contains(&ext)
}
