use crate::scraper::SessionResult;
use crate::{Result, SitepressError};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::Path;

/// Metadata describing one scraping session
///
/// Written to `metadata/session_info.json` when the session finalizes.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    /// Timestamp-derived identifier, unique per run on one host
    pub session_id: String,
    pub start_time: DateTime<Local>,
    pub end_time: Option<DateTime<Local>>,
    pub root_url: String,
    pub output_dir: String,
    pub pages_converted: usize,
    pub files_downloaded: usize,
    pub errors: Vec<String>,
}

impl SessionInfo {
    /// Starts a new session record for the given seed URL
    pub fn begin(root_url: &str, output_dir: &str) -> Self {
        let now = Local::now();
        Self {
            session_id: now.format("%Y%m%d_%H%M%S").to_string(),
            start_time: now,
            end_time: None,
            root_url: root_url.to_string(),
            output_dir: output_dir.to_string(),
            pages_converted: 0,
            files_downloaded: 0,
            errors: Vec::new(),
        }
    }

    /// Folds the scheduler's result into the record and stamps the end time
    pub fn finalize(&mut self, result: &SessionResult) {
        self.end_time = Some(Local::now());
        self.pages_converted = result.pages_converted;
        self.files_downloaded = result.files_downloaded;
        self.errors = result.errors.clone();
    }

    /// Writes the record to `metadata/session_info.json`
    pub fn save(&self, output_dir: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SitepressError::Report(e.to_string()))?;
        std::fs::write(output_dir.join("metadata").join("session_info.json"), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_finalize_folds_result() {
        let mut info = SessionInfo::begin("https://example.com/", "./out");
        assert!(info.end_time.is_none());

        let result = SessionResult {
            pages_converted: 4,
            files_downloaded: 2,
            errors: vec!["one error".to_string()],
            total_time: Duration::from_secs(3),
            output_dir: "./out".to_string(),
        };
        info.finalize(&result);

        assert!(info.end_time.is_some());
        assert_eq!(info.pages_converted, 4);
        assert_eq!(info.errors.len(), 1);
    }

    #[test]
    fn test_save_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("metadata")).unwrap();

        let info = SessionInfo::begin("https://example.com/", "./out");
        info.save(dir.path()).unwrap();

        let content =
            std::fs::read_to_string(dir.path().join("metadata/session_info.json")).unwrap();
        assert!(content.contains("\"root_url\": \"https://example.com/\""));
    }
}
