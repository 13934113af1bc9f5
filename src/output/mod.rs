//! Session output: directory layout, session metadata and summary report
//!
//! Pure post-run collaborators. The discovery engine and the scheduler
//! never touch these; the CLI hands them a settled graph and session
//! result after all work completes.

mod report;
mod session;

pub use report::write_summary;
pub use session::SessionInfo;

use crate::Result;
use std::path::Path;

/// Creates the output directory layout for one session
///
/// ```text
/// <output>/
///   pages/      PDF versions of web pages
///   files/      downloaded files, organized by type
///   metadata/   session metadata and index files
/// ```
pub fn create_output_structure(output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir.join("pages"))?;
    std::fs::create_dir_all(output_dir.join("files"))?;
    std::fs::create_dir_all(output_dir.join("metadata"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_output_structure() {
        let dir = tempfile::tempdir().unwrap();
        create_output_structure(dir.path()).unwrap();

        assert!(dir.path().join("pages").is_dir());
        assert!(dir.path().join("files").is_dir());
        assert!(dir.path().join("metadata").is_dir());

        // idempotent
        create_output_structure(dir.path()).unwrap();
    }
}
