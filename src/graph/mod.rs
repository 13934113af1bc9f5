//! Site graph accumulator
//!
//! The [`SiteGraph`] is the mutable accumulator for pages, links and files
//! discovered during one discovery session. Only the discovery engine writes
//! to it; once traversal settles it is handed downstream read-only, where the
//! selection step flattens it into a list of URLs and reporting queries its
//! statistics.

use std::collections::HashMap;
use url::Url;

/// A page successfully visited during discovery
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// Title extracted from the page markup (falls back to the last path segment)
    pub title: String,
    /// Depth at which the page was first visited; first-seen depth wins
    pub depth: u32,
    /// Set by downstream consumers once the page has been processed
    pub processed: bool,
}

/// A downloadable file reference found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    /// Absolute URL of the file
    pub url: String,
    /// Lowercase extension without the dot ("pdf", "docx", ...)
    pub kind: String,
    /// Anchor text of the link that referenced the file, when there was one
    pub link_text: Option<String>,
}

/// Directed graph of one website's discovered structure
///
/// Keys are absolute URL strings. Link adjacency preserves discovery order
/// and suppresses duplicate targets per source; files are deduplicated by
/// URL within a page. A URL may appear as a link target without a `pages`
/// entry when it was referenced but never visited.
#[derive(Debug)]
pub struct SiteGraph {
    root: Url,
    pages: HashMap<String, PageRecord>,
    links: HashMap<String, Vec<String>>,
    files: HashMap<String, Vec<FileRef>>,
}

impl SiteGraph {
    /// Creates an empty graph rooted at the seed URL
    pub fn new(root: Url) -> Self {
        Self {
            root,
            pages: HashMap::new(),
            links: HashMap::new(),
            files: HashMap::new(),
        }
    }

    /// The seed URL this graph was discovered from
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Records a successfully visited page
    pub fn add_page(&mut self, url: &Url, title: String, depth: u32) {
        self.pages.insert(
            url.as_str().to_string(),
            PageRecord {
                title,
                depth,
                processed: false,
            },
        );
        self.links.entry(url.as_str().to_string()).or_default();
        self.files.entry(url.as_str().to_string()).or_default();
    }

    /// Records a link edge from one page to a target URL
    ///
    /// Duplicate targets for the same source are suppressed; insertion order
    /// is otherwise preserved.
    pub fn add_link(&mut self, from: &Url, to: &Url) {
        let targets = self.links.entry(from.as_str().to_string()).or_default();
        let to = to.as_str();
        if !targets.iter().any(|t| t == to) {
            targets.push(to.to_string());
        }
    }

    /// Records a downloadable file found on a page
    ///
    /// Duplicate file URLs within the same page are suppressed.
    pub fn add_file(&mut self, page: &Url, file: FileRef) {
        let entries = self.files.entry(page.as_str().to_string()).or_default();
        if !entries.iter().any(|f| f.url == file.url) {
            entries.push(file);
        }
    }

    /// Marks a page as processed by a downstream consumer
    pub fn mark_processed(&mut self, url: &str) {
        if let Some(page) = self.pages.get_mut(url) {
            page.processed = true;
        }
    }

    /// Looks up a visited page
    pub fn page(&self, url: &str) -> Option<&PageRecord> {
        self.pages.get(url)
    }

    /// Link targets recorded for a page, in discovery order
    pub fn links_from(&self, url: &str) -> &[String] {
        self.links.get(url).map(Vec::as_slice).unwrap_or_default()
    }

    /// Files recorded for a page, in discovery order
    pub fn files_on(&self, url: &str) -> &[FileRef] {
        self.files.get(url).map(Vec::as_slice).unwrap_or_default()
    }

    /// All visited page URLs
    ///
    /// This is the "select all" reduction consumed by the path-processing
    /// scheduler when no interactive selection takes place.
    pub fn all_pages(&self) -> Vec<String> {
        self.pages.keys().cloned().collect()
    }

    /// Number of visited pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of link edges across all pages
    pub fn link_count(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    /// Total number of file references across all pages
    pub fn file_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn file_ref(url: &str) -> FileRef {
        FileRef {
            url: url.to_string(),
            kind: "pdf".to_string(),
            link_text: None,
        }
    }

    #[test]
    fn test_add_page_initializes_adjacency() {
        let mut graph = SiteGraph::new(url("https://example.com/"));
        graph.add_page(&url("https://example.com/"), "Home".to_string(), 0);

        assert_eq!(graph.page_count(), 1);
        assert!(graph.links_from("https://example.com/").is_empty());
        assert!(graph.files_on("https://example.com/").is_empty());
        assert_eq!(graph.page("https://example.com/").unwrap().depth, 0);
    }

    #[test]
    fn test_duplicate_links_suppressed_order_preserved() {
        let mut graph = SiteGraph::new(url("https://example.com/"));
        let root = url("https://example.com/");
        graph.add_link(&root, &url("https://example.com/b"));
        graph.add_link(&root, &url("https://example.com/a"));
        graph.add_link(&root, &url("https://example.com/b"));

        assert_eq!(
            graph.links_from("https://example.com/"),
            ["https://example.com/b", "https://example.com/a"]
        );
    }

    #[test]
    fn test_link_target_without_page_entry() {
        let mut graph = SiteGraph::new(url("https://example.com/"));
        graph.add_link(&url("https://example.com/"), &url("https://other.com/"));

        assert_eq!(graph.link_count(), 1);
        assert!(graph.page("https://other.com/").is_none());
    }

    #[test]
    fn test_duplicate_files_suppressed_per_page() {
        let mut graph = SiteGraph::new(url("https://example.com/"));
        let page = url("https://example.com/docs");
        graph.add_file(&page, file_ref("https://example.com/a.pdf"));
        graph.add_file(&page, file_ref("https://example.com/a.pdf"));
        graph.add_file(&page, file_ref("https://example.com/b.pdf"));

        assert_eq!(graph.file_count(), 2);
    }

    #[test]
    fn test_mark_processed() {
        let mut graph = SiteGraph::new(url("https://example.com/"));
        graph.add_page(&url("https://example.com/"), "Home".to_string(), 0);

        graph.mark_processed("https://example.com/");
        assert!(graph.page("https://example.com/").unwrap().processed);

        // unknown URLs are a no-op
        graph.mark_processed("https://example.com/missing");
    }
}
