use crate::config::types::{Config, CrawlerConfig, FilesConfig, OutputConfig, ScraperConfig};
use crate::ConfigError;

/// Validates the entire configuration
///
/// A violation here is fatal to the run; nothing is fetched before the
/// configuration has passed.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_scraper_config(&config.scraper)?;
    validate_output_config(&config.output)?;
    validate_files_config(&config.files)?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth > 10 {
        return Err(ConfigError::Validation(format!(
            "max-depth must not exceed 10, got {}",
            config.max_depth
        )));
    }

    if config.max_links_per_page < 1 || config.max_links_per_page > 500 {
        return Err(ConfigError::Validation(format!(
            "max-links-per-page must be between 1 and 500, got {}",
            config.max_links_per_page
        )));
    }

    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.crawl_delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "crawl-delay-ms must not exceed 60000, got {}",
            config.crawl_delay_ms
        )));
    }

    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "batch-size must be >= 1, got {}",
            config.batch_size
        )));
    }

    if let Some(requests) = config.max_concurrent_requests {
        if !(1..=100).contains(&requests) {
            return Err(ConfigError::Validation(format!(
                "scraper max-concurrent-requests must be between 1 and 100, got {}",
                requests
            )));
        }
    }

    if config.max_concurrent_downloads < 1 || config.max_concurrent_downloads > 100 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-downloads must be between 1 and 100, got {}",
            config.max_concurrent_downloads
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates downloadable extension entries
fn validate_files_config(config: &FilesConfig) -> Result<(), ConfigError> {
    for ext in &config.extensions {
        let ext = ext.trim_start_matches('.');
        if ext.is_empty() {
            return Err(ConfigError::Validation(
                "file extension entries cannot be empty".to_string(),
            ));
        }
        if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(format!(
                "file extension '{}' contains invalid characters",
                ext
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_depth_zero_is_accepted() {
        let mut config = Config::default();
        config.crawler.max_depth = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_depth_above_limit_rejected() {
        let mut config = Config::default();
        config.crawler.max_depth = 11;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = Config::default();
        config.crawler.max_concurrent_requests = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excessive_delay_rejected() {
        let mut config = Config::default();
        config.crawler.crawl_delay_ms = 61_000;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut config = Config::default();
        config.scraper.batch_size = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_scraper_concurrency_out_of_range_rejected() {
        let mut config = Config::default();
        config.scraper.max_concurrent_requests = Some(0);
        assert!(validate(&config).is_err());

        config.scraper.max_concurrent_requests = Some(101);
        assert!(validate(&config).is_err());

        config.scraper.max_concurrent_requests = Some(10);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_bad_extension_rejected() {
        let mut config = Config::default();
        config.files.extensions.push("p d f".to_string());
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_leading_dot_extension_accepted() {
        let mut config = Config::default();
        config.files.extensions.push(".docm".to_string());
        assert!(validate(&config).is_ok());
        assert!(config.extension_set().contains("docm"));
    }
}
