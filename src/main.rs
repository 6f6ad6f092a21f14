//! Shirt-Scraper main entry point
//!
//! This is the command-line interface for the Shirt-Scraper product scraper.

use anyhow::Context;
use clap::Parser;
use shirt_scraper::config::{load_config_with_hash, validate, Config};
use shirt_scraper::scrape::scrape;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shirt-Scraper: scrape a product listing into a dated CSV snapshot
///
/// Fetches the listing page, follows every item link on it, and writes one
/// row per item to `<data-dir>/<YYYY-MM-DD>.csv`, replacing the previous
/// snapshot. Failures are appended to the error log.
#[derive(Parser, Debug)]
#[command(name = "shirt-scraper")]
#[command(version)]
#[command(about = "Scrape a product listing into a dated CSV snapshot", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resolved configuration without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    // Scrape failures end up in the error log; the exit status stays 0
    let report = scrape(config)
        .await
        .context("Failed to initialize the scraper")?;

    if let Some(path) = &report.output_path {
        tracing::debug!("Snapshot at {}", path.display());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shirt_scraper=info,warn"),
            1 => EnvFilter::new("shirt_scraper=debug,info"),
            2 => EnvFilter::new("shirt_scraper=trace,debug"),
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

/// Handles the --dry-run mode: shows what a run would do
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    validate(config).context("Configuration is invalid")?;

    println!("=== Shirt-Scraper Dry Run ===\n");

    println!("Scraper:");
    println!("  Entry URL: {}", config.scraper.entry_url);
    println!("  Site origin: {}", config.scraper.site_origin);
    println!("  Link prefix: {}", config.scraper.link_prefix);
    println!("  Picture selector: {}", config.scraper.picture_selector);
    println!("  Price selector: {}", config.scraper.price_selector);
    println!(
        "  Timeouts: {}s request, {}s connect",
        config.scraper.request_timeout_secs, config.scraper.connect_timeout_secs
    );

    println!("\nUser Agent:");
    println!(
        "  {}/{}",
        config.user_agent.crawler_name, config.user_agent.crawler_version
    );

    println!("\nOutput:");
    println!("  Data directory: {}", config.output.data_dir.display());
    println!("  Error log: {}", config.output.error_log_path.display());

    println!("\n✓ Configuration is valid");

    Ok(())
}
