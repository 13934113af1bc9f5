use url::Url;

/// Checks whether two URLs belong to the same domain
///
/// With `allow_subdomains` false the hosts must match exactly (case
/// insensitively). With it true, the rightmost two dot-separated labels are
/// compared, so `www.example.com` and `docs.example.com` match.
///
/// The two-label comparison is a registrable-domain approximation. It
/// misclassifies multi-part public suffixes: `a.co.uk` and `b.co.uk` compare
/// equal because both reduce to `co.uk`. This is a known limitation, kept in
/// preference to carrying a public-suffix list.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitepress::url::is_same_domain;
///
/// let a = Url::parse("https://www.example.com/").unwrap();
/// let b = Url::parse("https://docs.example.com/").unwrap();
/// assert!(!is_same_domain(&a, &b, false));
/// assert!(is_same_domain(&a, &b, true));
/// ```
pub fn is_same_domain(a: &Url, b: &Url, allow_subdomains: bool) -> bool {
    let (Some(host_a), Some(host_b)) = (a.host_str(), b.host_str()) else {
        return false;
    };

    let host_a = host_a.to_lowercase();
    let host_b = host_b.to_lowercase();

    if allow_subdomains {
        main_domain(&host_a) == main_domain(&host_b)
    } else {
        host_a == host_b
    }
}

/// Reduces a host to its rightmost two labels
fn main_domain(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() >= 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        host.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_exact_host_match() {
        assert!(is_same_domain(
            &url("https://example.com/a"),
            &url("https://example.com/b"),
            false
        ));
    }

    #[test]
    fn test_subdomain_rejected_without_flag() {
        assert!(!is_same_domain(
            &url("https://example.com/"),
            &url("https://www.example.com/"),
            false
        ));
    }

    #[test]
    fn test_subdomain_accepted_with_flag() {
        assert!(is_same_domain(
            &url("https://example.com/"),
            &url("https://www.example.com/"),
            true
        ));
    }

    #[test]
    fn test_sibling_subdomains_with_flag() {
        assert!(is_same_domain(
            &url("https://blog.example.com/"),
            &url("https://docs.example.com/"),
            true
        ));
    }

    #[test]
    fn test_different_domains() {
        assert!(!is_same_domain(
            &url("https://example.com/"),
            &url("https://other.com/"),
            true
        ));
    }

    #[test]
    fn test_case_insensitive_hosts() {
        assert!(is_same_domain(
            &url("https://EXAMPLE.com/"),
            &url("https://example.COM/"),
            false
        ));
    }

    #[test]
    fn test_known_public_suffix_limitation() {
        // Documented approximation: co.uk siblings compare equal
        assert!(is_same_domain(
            &url("https://one.co.uk/"),
            &url("https://two.co.uk/"),
            true
        ));
    }
}
