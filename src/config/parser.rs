use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
max-depth = 2
max-links-per-page = 20
max-concurrent-requests = 4
crawl-delay-ms = 250
allow-subdomains = false

[scraper]
batch-size = 3
inter-batch-pause-ms = 100
max-concurrent-downloads = 2

[output]
directory = "./out"

[files]
extensions = ["pdf", "csv"]
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.max_depth, 2);
        assert_eq!(config.crawler.max_links_per_page, 20);
        assert!(!config.crawler.allow_subdomains);
        assert_eq!(config.scraper.batch_size, 3);
        assert_eq!(config.output.directory, "./out");
        assert!(config.extension_set().contains("csv"));
    }

    #[test]
    fn test_scraper_concurrency_falls_back_to_crawler() {
        let config_content = r#"
[crawler]
max-concurrent-requests = 7
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.scraper_concurrency(), 7);

        let config_content = r#"
[crawler]
max-concurrent-requests = 7

[scraper]
max-concurrent-requests = 2
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.scraper_concurrency(), 2);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.max_depth, 3);
        assert_eq!(config.scraper.batch_size, 5);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawler]
max-depth = 3
max-links-per-page = 50
max-concurrent-requests = 0
crawl-delay-ms = 1000
allow-subdomains = true
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
