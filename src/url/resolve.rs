use url::Url;

/// Resolves a possibly-relative href against a base URL
///
/// Returns `None` for input the crawler must skip rather than abort on:
/// empty hrefs, fragment-only anchors, javascript:/mailto:/tel:/data:
/// pseudo-links, anything that fails URL resolution, and anything that
/// resolves to a non-HTTP(S) URL.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitepress::url::resolve;
///
/// let base = Url::parse("https://example.com/docs/").unwrap();
/// assert_eq!(
///     resolve(&base, "guide.html").unwrap().as_str(),
///     "https://example.com/docs/guide.html"
/// );
/// assert!(resolve(&base, "javascript:void(0)").is_none());
/// assert!(resolve(&base, "#section").is_none());
/// ```
pub fn resolve(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let resolved = base.join(href).ok()?;
    if crate::url::is_valid(&resolved) {
        Some(resolved)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/a/b").unwrap()
    }

    #[test]
    fn test_resolve_absolute() {
        let url = resolve(&base(), "https://other.com/page").unwrap();
        assert_eq!(url.as_str(), "https://other.com/page");
    }

    #[test]
    fn test_resolve_root_relative() {
        let url = resolve(&base(), "/c").unwrap();
        assert_eq!(url.as_str(), "https://example.com/c");
    }

    #[test]
    fn test_resolve_path_relative() {
        let url = resolve(&base(), "c").unwrap();
        assert_eq!(url.as_str(), "https://example.com/a/c");
    }

    #[test]
    fn test_resolve_with_whitespace() {
        let url = resolve(&base(), "  /c  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/c");
    }

    #[test]
    fn test_skip_empty_and_fragment() {
        assert!(resolve(&base(), "").is_none());
        assert!(resolve(&base(), "#top").is_none());
    }

    #[test]
    fn test_skip_pseudo_schemes() {
        assert!(resolve(&base(), "javascript:alert(1)").is_none());
        assert!(resolve(&base(), "mailto:a@b.com").is_none());
        assert!(resolve(&base(), "tel:+123456").is_none());
        assert!(resolve(&base(), "data:text/plain,hi").is_none());
    }

    #[test]
    fn test_skip_non_http_resolution() {
        assert!(resolve(&base(), "ftp://example.com/file").is_none());
    }
}
