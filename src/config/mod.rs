//! Configuration module for Sitepress
//!
//! Configuration is loaded from a TOML file, validated eagerly (a bad
//! configuration is fatal before any traversal begins), and falls back to
//! built-in defaults when no file is given.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, FilesConfig, OutputConfig, ScraperConfig};
pub use validation::validate;
