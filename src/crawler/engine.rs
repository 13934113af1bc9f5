//! Discovery engine - recursive, depth-bounded, concurrency-limited traversal
//!
//! The engine owns the visited set and the site graph for one discovery
//! session. Traversal is recursive: each visited page schedules its eligible
//! children concurrently, with a single counting semaphore bounding in-flight
//! fetches across the whole traversal. The semaphore permit covers only the
//! fetch itself, never the subtree beneath it; holding a permit across
//! recursion could exhaust the pool and stall under small bounds.

use crate::config::Config;
use crate::crawler::{build_http_client, fetch_page};
use crate::graph::SiteGraph;
use crate::url::{is_same_domain, is_valid};
use crate::{Result, SitepressError};
use futures::future::{join_all, BoxFuture, FutureExt};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use url::Url;

/// Per-session traversal state
///
/// The visited set and the graph are shared across every concurrently
/// running branch of one session. Guards are held only across synchronous
/// mutation, never across an await.
struct Session {
    visited: Mutex<HashSet<String>>,
    graph: Mutex<SiteGraph>,
    semaphore: Semaphore,
}

impl Session {
    fn new(root: Url, max_concurrent: usize) -> Self {
        Self {
            visited: Mutex::new(HashSet::new()),
            graph: Mutex::new(SiteGraph::new(root)),
            semaphore: Semaphore::new(max_concurrent),
        }
    }

    /// Claims a URL for traversal
    ///
    /// Insert-if-absent: returns true when the caller won the claim and must
    /// proceed to fetch, false when another branch already owns the URL.
    /// Claiming happens strictly before the fetch, so two branches can never
    /// fetch the same URL.
    fn claim(&self, url: &Url) -> bool {
        self.visited
            .lock()
            .unwrap()
            .insert(url.as_str().to_string())
    }
}

/// The discovery engine
///
/// Built once per configuration; [`Discovery::discover`] runs one session
/// from a seed URL to a settled [`SiteGraph`].
pub struct Discovery {
    config: Arc<Config>,
    client: Client,
    extensions: HashSet<String>,
}

impl Discovery {
    /// Creates a discovery engine from the configuration
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = build_http_client(&config.user_agent)?;
        let extensions = config.extension_set();

        Ok(Self {
            config,
            client,
            extensions,
        })
    }

    /// Discovers the reachable structure of a website from a seed URL
    ///
    /// Performs the full depth-bounded traversal and returns the settled
    /// graph. Per-page failures are logged and skipped; only an invalid seed
    /// URL is an error.
    pub async fn discover(&self, root: &Url) -> Result<SiteGraph> {
        if !is_valid(root) {
            return Err(SitepressError::InvalidSeed(root.as_str().to_string()));
        }

        tracing::info!("Starting site discovery for {}", root);

        let session = Session::new(
            root.clone(),
            self.config.crawler.max_concurrent_requests,
        );
        self.visit(&session, root.clone(), 0).await;

        let graph = session.graph.into_inner().unwrap();
        tracing::info!(
            "Site discovery completed: {} pages, {} links, {} files",
            graph.page_count(),
            graph.link_count(),
            graph.file_count()
        );

        Ok(graph)
    }

    /// Visits one URL at the given depth, then its children recursively
    ///
    /// Terminal no-ops: depth beyond the bound, or a lost claim. The visited
    /// set is depth-agnostic, so a URL reachable at several depths keeps its
    /// first-seen depth. The root fetch is never delayed; every deeper fetch
    /// waits out the crawl delay first.
    fn visit<'a>(&'a self, session: &'a Session, url: Url, depth: u32) -> BoxFuture<'a, ()> {
        async move {
            if depth > self.config.crawler.max_depth {
                return;
            }

            if !session.claim(&url) {
                return;
            }

            if depth > 0 {
                tokio::time::sleep(self.config.crawl_delay()).await;
            }

            let outcome = {
                let _permit = session
                    .semaphore
                    .acquire()
                    .await
                    .expect("discovery semaphore closed");
                fetch_page(&self.client, &url, depth, &self.extensions).await
            };

            if !outcome.success {
                tracing::warn!(
                    "Error crawling {}: {}",
                    url,
                    outcome.error.as_deref().unwrap_or("unknown error")
                );
                return;
            }

            // Record the page and decide which children to traverse. Links
            // are truncated to max_links_per_page before both edge recording
            // and scheduling: an untruncated link is neither an edge nor a
            // traversal candidate. Edges are recorded regardless of domain;
            // traversal never crosses the domain boundary.
            let mut children = Vec::new();
            {
                let mut graph = session.graph.lock().unwrap();
                graph.add_page(&url, outcome.title, depth);

                for file in outcome.files {
                    graph.add_file(&url, file);
                }

                for link in outcome
                    .links
                    .iter()
                    .take(self.config.crawler.max_links_per_page)
                {
                    graph.add_link(&url, link);

                    if depth < self.config.crawler.max_depth
                        && is_same_domain(&url, link, self.config.crawler.allow_subdomains)
                    {
                        children.push(link.clone());
                    }
                }
            }

            if !children.is_empty() {
                join_all(
                    children
                        .into_iter()
                        .map(|child| self.visit(session, child, depth + 1)),
                )
                .await;
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_is_at_most_once() {
        let session = Session::new(Url::parse("https://example.com/").unwrap(), 1);
        let url = Url::parse("https://example.com/page").unwrap();

        assert!(session.claim(&url));
        assert!(!session.claim(&url));
    }

    #[test]
    fn test_invalid_seed_rejected() {
        let discovery = Discovery::new(Arc::new(Config::default())).unwrap();
        let seed = Url::parse("ftp://example.com/").unwrap();

        let result = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(discovery.discover(&seed));
        assert!(matches!(result, Err(SitepressError::InvalidSeed(_))));
    }
}
