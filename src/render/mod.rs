//! PDF render backends
//!
//! Rendering a page to PDF is an external capability with several
//! interchangeable implementations. Availability is probed once at startup
//! in a fixed preference order (Chromium-family headless, then wkhtmltopdf)
//! and resolves to exactly one backend; the scheduler only ever sees the
//! [`PageRenderer`] trait and never branches on which backend is active.

use crate::{Result, SitepressError};
use futures::future::{BoxFuture, FutureExt};
use std::io::Write;
use std::path::Path;
use tokio::process::Command;
use url::Url;

/// Chromium-family executables probed in order, before wkhtmltopdf
const CHROMIUM_EXECUTABLES: [&str; 4] =
    ["chromium", "chromium-browser", "google-chrome", "chrome"];

/// The render-to-file capability consumed by the scheduler
pub trait PageRenderer: Send + Sync {
    /// Renders the page at `url` to a PDF at `output`; true on success
    fn render_url<'a>(&'a self, url: &'a Url, output: &'a Path) -> BoxFuture<'a, bool>;

    /// Renders inline markup to a PDF at `output`; true on success
    fn render_html<'a>(&'a self, html: &'a str, output: &'a Path) -> BoxFuture<'a, bool>;

    /// Backend name, for logging only
    fn name(&self) -> &'static str;
}

/// Which external renderer a [`CommandRenderer`] drives
#[derive(Debug, Clone)]
enum Backend {
    /// Chromium-family headless browser (`--print-to-pdf`)
    Chromium { executable: &'static str },
    /// wkhtmltopdf
    Wkhtmltopdf,
}

/// Renderer backed by an external command-line program
pub struct CommandRenderer {
    backend: Backend,
}

impl CommandRenderer {
    /// Probes available backends in preference order and resolves one
    ///
    /// The order is fixed so the same host always resolves the same backend.
    /// No usable backend is a startup error, not a per-page one.
    pub async fn detect() -> Result<Self> {
        for executable in CHROMIUM_EXECUTABLES {
            if probe(executable).await {
                tracing::info!("PDF renderer: {} (headless)", executable);
                return Ok(Self {
                    backend: Backend::Chromium { executable },
                });
            }
        }

        if probe("wkhtmltopdf").await {
            tracing::info!("PDF renderer: wkhtmltopdf");
            return Ok(Self {
                backend: Backend::Wkhtmltopdf,
            });
        }

        Err(SitepressError::NoRenderBackend(
            "no chromium-family browser or wkhtmltopdf found on PATH".to_string(),
        ))
    }

    async fn render(&self, target: &str, output: &Path) -> bool {
        let result = match &self.backend {
            Backend::Chromium { executable } => {
                Command::new(executable)
                    .arg("--headless")
                    .arg("--disable-gpu")
                    .arg("--no-sandbox")
                    .arg("--disable-dev-shm-usage")
                    .arg(format!("--print-to-pdf={}", output.display()))
                    .arg("--virtual-time-budget=10000")
                    .arg(target)
                    .output()
                    .await
            }
            Backend::Wkhtmltopdf => {
                Command::new("wkhtmltopdf")
                    .arg("--quiet")
                    .arg(target)
                    .arg(output)
                    .output()
                    .await
            }
        };

        match result {
            Ok(out) if out.status.success() && output.exists() => true,
            Ok(out) => {
                tracing::warn!(
                    "Render of {} failed: {}",
                    target,
                    String::from_utf8_lossy(&out.stderr).trim()
                );
                false
            }
            Err(e) => {
                tracing::warn!("Render of {} failed to launch: {}", target, e);
                false
            }
        }
    }
}

impl PageRenderer for CommandRenderer {
    fn render_url<'a>(&'a self, url: &'a Url, output: &'a Path) -> BoxFuture<'a, bool> {
        async move { self.render(url.as_str(), output).await }.boxed()
    }

    fn render_html<'a>(&'a self, html: &'a str, output: &'a Path) -> BoxFuture<'a, bool> {
        async move {
            // Command-line backends want a file, so stage the markup in a
            // temp file addressed by a file:// URL for the duration.
            let temp = match tempfile::Builder::new().suffix(".html").tempfile() {
                Ok(mut file) => {
                    if file.write_all(html.as_bytes()).is_err() {
                        return false;
                    }
                    file
                }
                Err(e) => {
                    tracing::warn!("Failed to stage HTML for rendering: {}", e);
                    return false;
                }
            };

            let target = format!("file://{}", temp.path().display());
            self.render(&target, output).await
        }
        .boxed()
    }

    fn name(&self) -> &'static str {
        match self.backend {
            Backend::Chromium { executable } => executable,
            Backend::Wkhtmltopdf => "wkhtmltopdf",
        }
    }
}

/// Checks whether an executable responds to --version
async fn probe(executable: &str) -> bool {
    Command::new(executable)
        .arg("--version")
        .output()
        .await
        .map(|out| out.status.success())
        .unwrap_or(false)
}
