//! Sitepress main entry point
//!
//! This is the command-line interface for the Sitepress site-to-PDF press.

use clap::Parser;
use sitepress::config::{load_config, validate, Config};
use sitepress::output::{create_output_structure, write_summary, SessionInfo};
use sitepress::render::CommandRenderer;
use sitepress::{Discovery, Scraper, SitepressError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Sitepress: a site-to-PDF press
///
/// Sitepress discovers the pages of a website by bounded recursive
/// traversal, converts each page to PDF, and downloads the document
/// files the pages link to. Output lands in a structured session
/// directory together with metadata and a summary report.
#[derive(Parser, Debug)]
#[command(name = "sitepress")]
#[command(version = "1.0.0")]
#[command(about = "A site-to-PDF press", long_about = None)]
struct Cli {
    /// Root URL to start discovering from
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long, value_name = "DIR")]
    output: Option<String>,

    /// Maximum traversal depth (overrides config)
    #[arg(short, long, value_name = "DEPTH")]
    depth: Option<u32>,

    /// Validate settings and show what would run, without touching the network
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, falling back to defaults when no file is given
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    // Apply command-line overrides, then re-validate
    if let Some(output) = cli.output {
        config.output.directory = output;
    }
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    let root = Url::parse(&cli.url).map_err(|_| SitepressError::InvalidSeed(cli.url.clone()))?;

    if cli.dry_run {
        print_dry_run(&root, &config);
        return Ok(());
    }

    run(Arc::new(config), &root).await?;

    Ok(())
}

/// Runs one full session: discover, press, report
async fn run(config: Arc<Config>, root: &Url) -> Result<(), SitepressError> {
    let output_dir = PathBuf::from(&config.output.directory);

    tracing::info!("Discovering site structure from {}", root);
    let discovery = Discovery::new(Arc::clone(&config))?;
    let mut graph = discovery.discover(root).await?;

    tracing::info!(
        "Discovery completed: {} pages, {} links, {} files",
        graph.page_count(),
        graph.link_count(),
        graph.file_count()
    );

    create_output_structure(&output_dir)?;

    let mut info = SessionInfo::begin(root.as_str(), &config.output.directory);

    // Every discovered page is selected; selection filtering belongs to
    // interactive callers building on the library API.
    let selected: Vec<Url> = graph
        .all_pages()
        .iter()
        .filter_map(|u| Url::parse(u).ok())
        .collect();

    let renderer = Arc::new(CommandRenderer::detect().await?);
    let scraper = Scraper::new(Arc::clone(&config), renderer)?;

    let batches_done = AtomicUsize::new(0);
    let batch_count = selected.len().div_ceil(config.scraper.batch_size);
    let progress = move || {
        let done = batches_done.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!("Batch {}/{} complete", done, batch_count);
    };

    let result = scraper.process_paths(&selected, Some(&progress)).await;

    for url in &selected {
        graph.mark_processed(url.as_str());
    }

    info.finalize(&result);
    info.save(&output_dir)?;
    write_summary(&output_dir, &info, &graph)?;

    print_session_summary(&info, &output_dir);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitepress=info,warn"),
            1 => EnvFilter::new("sitepress=debug,info"),
            2 => EnvFilter::new("sitepress=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints the --dry-run report: the validated settings a run would use
///
/// No network activity takes place; discovery happens only on a real run.
fn print_dry_run(root: &Url, config: &Config) {
    println!("=== Sitepress Dry Run ===\n");

    println!("Seed URL: {}", root);

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max links per page: {}", config.crawler.max_links_per_page);
    println!(
        "  Max concurrent requests: {}",
        config.crawler.max_concurrent_requests
    );
    println!("  Crawl delay: {}ms", config.crawler.crawl_delay_ms);
    println!("  Allow subdomains: {}", config.crawler.allow_subdomains);

    println!("\nScraper Configuration:");
    println!("  Batch size: {}", config.scraper.batch_size);
    println!(
        "  Inter-batch pause: {}ms",
        config.scraper.inter_batch_pause_ms
    );
    println!(
        "  Max concurrent downloads: {}",
        config.scraper.max_concurrent_downloads
    );

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);

    println!("\nDownloadable extensions ({}):", config.files.extensions.len());
    println!("  {}", config.files.extensions.join(", "));
}

/// Prints the end-of-session summary to stdout
fn print_session_summary(info: &SessionInfo, output_dir: &Path) {
    println!("\n=== Session Complete ===");
    println!("Pages converted: {}", info.pages_converted);
    println!("Files downloaded: {}", info.files_downloaded);
    println!("Errors: {}", info.errors.len());
    println!("Output: {}", output_dir.display());
    if !info.errors.is_empty() {
        println!("See SUMMARY.md for error details");
    }
}
