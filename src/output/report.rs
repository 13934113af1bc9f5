//! Markdown summary report generation

use crate::graph::SiteGraph;
use crate::output::SessionInfo;
use crate::Result;
use chrono::Local;
use std::fmt::Write as _;
use std::path::Path;

/// Errors listed in full before the report truncates the remainder
const MAX_ERRORS_SHOWN: usize = 10;

/// Writes `SUMMARY.md` into the output directory
///
/// A human-readable wrap-up of one session: what was discovered, what was
/// converted and downloaded, and the first few errors.
pub fn write_summary(output_dir: &Path, info: &SessionInfo, graph: &SiteGraph) -> Result<()> {
    let report = render_summary(info, graph);
    std::fs::write(output_dir.join("SUMMARY.md"), report)?;
    tracing::info!("Summary report written to {}", output_dir.display());
    Ok(())
}

fn render_summary(info: &SessionInfo, graph: &SiteGraph) -> String {
    let mut out = String::new();

    let duration = match info.end_time {
        Some(end) => {
            let secs = (end - info.start_time).num_seconds();
            format!("{}m {}s", secs / 60, secs % 60)
        }
        None => "unknown".to_string(),
    };

    let _ = writeln!(out, "# Scraping Summary\n");
    let _ = writeln!(out, "## Session");
    let _ = writeln!(out, "- **Session ID**: {}", info.session_id);
    let _ = writeln!(out, "- **Root URL**: {}", graph.root());
    let _ = writeln!(
        out,
        "- **Started**: {}",
        info.start_time.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "- **Duration**: {}\n", duration);

    let _ = writeln!(out, "## Discovery");
    let _ = writeln!(out, "- **Pages discovered**: {}", graph.page_count());
    let _ = writeln!(out, "- **Links found**: {}", graph.link_count());
    let _ = writeln!(out, "- **Files found**: {}\n", graph.file_count());

    let _ = writeln!(out, "## Results");
    let _ = writeln!(out, "- **Pages converted to PDF**: {}", info.pages_converted);
    let _ = writeln!(out, "- **Files downloaded**: {}", info.files_downloaded);
    let _ = writeln!(out, "- **Errors encountered**: {}\n", info.errors.len());

    if !info.errors.is_empty() {
        let _ = writeln!(out, "## Errors");
        for (i, error) in info.errors.iter().take(MAX_ERRORS_SHOWN).enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, error);
        }
        if info.errors.len() > MAX_ERRORS_SHOWN {
            let _ = writeln!(
                out,
                "... and {} more errors",
                info.errors.len() - MAX_ERRORS_SHOWN
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "---\n*Generated on {}*",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn test_graph() -> SiteGraph {
        let root = Url::parse("https://example.com/").unwrap();
        let mut graph = SiteGraph::new(root.clone());
        graph.add_page(&root, "Home".to_string(), 0);
        graph.add_link(&root, &Url::parse("https://example.com/a").unwrap());
        graph
    }

    #[test]
    fn test_summary_contains_counts() {
        let info = SessionInfo::begin("https://example.com/", "./out");
        let report = render_summary(&info, &test_graph());

        assert!(report.contains("**Pages discovered**: 1"));
        assert!(report.contains("**Links found**: 1"));
        assert!(report.contains("https://example.com/"));
    }

    #[test]
    fn test_summary_truncates_errors() {
        let mut info = SessionInfo::begin("https://example.com/", "./out");
        info.errors = (0..15).map(|i| format!("error {}", i)).collect();

        let report = render_summary(&info, &test_graph());
        assert!(report.contains("error 9"));
        assert!(!report.contains("error 10\n"));
        assert!(report.contains("... and 5 more errors"));
    }
}
