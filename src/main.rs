//! Site-Mirror main entry point
//!
//! This is the command-line interface for the Site-Mirror crawler.

use clap::Parser;
use site_mirror::config::{load_config_with_hash, validate, Config};
use site_mirror::crawler::crawl;
use site_mirror::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Mirror: a resumable website mirroring crawler
///
/// Site-Mirror follows same-site links from a seed URL, saves every page and resource
/// under the output directory with links rewritten for offline browsing, and records
/// progress so an interrupted run can be resumed.
#[derive(Parser, Debug)]
#[command(name = "site-mirror")]
#[command(version)]
#[command(about = "A resumable website mirroring crawler", long_about = None)]
struct Cli {
    /// Seed URL to start mirroring from
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Link depth to report (not enforced)
    #[arg(short, long, value_name = "N")]
    depth: Option<u32>,

    /// Directory the mirror is written to
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Visited URLs log (default: <output>/links.txt)
    #[arg(short, long, value_name = "PATH")]
    links_file: Option<PathBuf>,

    /// Discovered URLs log (default: <output>/parsed_links.txt)
    #[arg(short, long, value_name = "PATH")]
    parsed_links_file: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pause after each mirrored URL in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

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

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    validate(&config)?;

    let has_log_file = cli.links_file.is_some() || cli.parsed_links_file.is_some();
    let seed = match (&cli.url, has_log_file) {
        (Some(url), _) => url.clone(),
        (None, true) => String::new(),
        (None, false) => {
            return Err("a URL is required unless --links-file or --parsed-links-file is given".into());
        }
    };

    handle_crawl(&config, &seed).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_mirror=info,warn"),
            1 => EnvFilter::new("site_mirror=debug,info"),
            2 => EnvFilter::new("site_mirror=trace,debug"),
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

/// Command-line flags take precedence over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.request_delay_ms = delay_ms;
    }
    if let Some(output) = &cli.output {
        config.output.output_dir = output.to_string_lossy().into_owned();
    }
    if let Some(path) = &cli.links_file {
        config.output.links_file = Some(path.to_string_lossy().into_owned());
    }
    if let Some(path) = &cli.parsed_links_file {
        config.output.parsed_links_file = Some(path.to_string_lossy().into_owned());
    }
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, seed: &str) -> Result<(), Box<dyn std::error::Error>> {
    if seed.is_empty() {
        tracing::info!("No seed URL given, resuming from the discovered log");
    } else {
        tracing::info!("Mirroring {}", seed);
    }
    tracing::info!(
        "Output: {} | Visited log: {} | Discovered log: {}",
        config.output_dir().display(),
        config.links_file_path().display(),
        config.parsed_links_file_path().display()
    );
    tracing::info!(
        "Depth: {} | Delay: {}ms",
        config.crawler.max_depth,
        config.crawler.request_delay_ms
    );

    // Run the crawler
    match crawl(config, seed).await {
        Ok(stats) => {
            tracing::info!("Crawl completed successfully");
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
