//! HTML parsing for titles, links and file references
//!
//! The crawler treats markup extraction as a pure function over one page:
//! given HTML and the page's URL, produce the title, every followable link
//! and every downloadable file reference, in source scan order.

use crate::graph::FileRef;
use crate::url::{is_downloadable, resolve};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracted information from one HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title from the <title> tag, when present and non-empty
    pub title: Option<String>,

    /// Followable links in scan order, deduplicated, absolute
    pub links: Vec<Url>,

    /// Downloadable file references in scan order, deduplicated by URL
    pub files: Vec<FileRef>,
}

/// Parses HTML content into title, links and downloadable file references
///
/// Links come from `<a href>` tags; anything [`resolve`] rejects (fragments,
/// javascript:/mailto:/tel:/data:, malformed hrefs) is silently skipped.
/// File references come from anchors whose URL extension is in
/// `extensions`, and from embedded content (`iframe`, `object`, `embed`)
/// pointing at such URLs.
pub fn parse_page(html: &str, base_url: &Url, extensions: &HashSet<String>) -> ParsedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let links = extract_links(&document, base_url);
    let files = extract_files(&document, base_url, extensions);

    ParsedPage {
        title,
        links,
        files,
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts all followable links, deduplicated with order preserved
fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve(base_url, href) {
                    if seen.insert(absolute.as_str().to_string()) {
                        links.push(absolute);
                    }
                }
            }
        }
    }

    links
}

/// Extracts downloadable file references from anchors and embedded content
fn extract_files(document: &Html, base_url: &Url, extensions: &HashSet<String>) -> Vec<FileRef> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    // Anchor tags carry link text alongside the reference
    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Some(absolute) = resolve(base_url, href) else {
                continue;
            };
            if !is_downloadable(&absolute, extensions) {
                continue;
            }
            if !seen.insert(absolute.as_str().to_string()) {
                continue;
            }

            let text = element.text().collect::<String>().trim().to_string();
            files.push(FileRef {
                url: absolute.as_str().to_string(),
                kind: crate::url::extension(&absolute),
                link_text: (!text.is_empty()).then_some(text),
            });
        }
    }

    // Files can also arrive embedded (a PDF in an iframe, for example)
    if let Ok(embed_selector) = Selector::parse("iframe[src], object[src], embed[src]") {
        for element in document.select(&embed_selector) {
            let Some(src) = element.value().attr("src") else {
                continue;
            };
            let Some(absolute) = resolve(base_url, src) else {
                continue;
            };
            if !is_downloadable(&absolute, extensions) {
                continue;
            }
            if !seen.insert(absolute.as_str().to_string()) {
                continue;
            }

            files.push(FileRef {
                url: absolute.as_str().to_string(),
                kind: crate::url::extension(&absolute),
                link_text: None,
            });
        }
    }

    files
}
