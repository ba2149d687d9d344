//! Storycrawl main entry point
//!
//! This is the command-line interface for the storycrawl article crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use storycrawl::config::load_config_with_hash;
use storycrawl::crawler::{plan_listing_pages, Coordinator, ARTICLES_PER_PAGE};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Storycrawl: a bounded article crawler and summarizer
///
/// Storycrawl walks a site's paginated article listing, extracts the title
/// and body of each article page, optionally summarizes the body through an
/// OpenAI-compatible API, and stops once a configured number of articles
/// has been collected.
#[derive(Parser, Debug)]
#[command(name = "storycrawl")]
#[command(version = "0.1.0")]
#[command(about = "A bounded article crawler and summarizer", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the configured article limit for this run
    #[arg(long, value_name = "N")]
    max_items: Option<u32>,

    /// Validate config and show the planned listing pages without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(max_items) = cli.max_items {
        tracing::info!("Overriding max-items: {}", max_items);
        config.crawl.max_items = max_items;
        storycrawl::config::validate(&config).context("max-items override failed validation")?;
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("storycrawl=info,warn"),
            1 => EnvFilter::new("storycrawl=debug,info"),
            2 => EnvFilter::new("storycrawl=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the planned pages
fn handle_dry_run(config: &storycrawl::config::Config) -> anyhow::Result<()> {
    println!("=== Storycrawl Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Base URL: {}", config.crawl.base_url);
    println!("  Max items: {}", config.crawl.max_items);
    println!(
        "  Max concurrent requests: {}",
        config.crawl.max_concurrent_requests
    );
    println!("  Detail path prefix: {}", config.crawl.detail_path_prefix);

    println!("\nSummarizer:");
    if config.summarizer.enabled {
        println!("  Endpoint: {}", config.summarizer.endpoint);
        println!("  Model: {}", config.summarizer.model);
        println!("  Max sentences: {}", config.summarizer.max_sentences);
    } else {
        println!("  Disabled (records will carry a null summary)");
    }

    println!("\nOutput:");
    match config.output.format {
        storycrawl::config::OutputFormat::Jsonl => {
            println!("  Records: {}", config.output.records_path);
            println!("  Usage log: {}", config.output.usage_path);
        }
        storycrawl::config::OutputFormat::Sqlite => {
            println!("  Database: {}", config.output.database_path);
        }
    }

    let base_url = Url::parse(&config.crawl.base_url)?;
    let planned = plan_listing_pages(&base_url, config.crawl.max_items, ARTICLES_PER_PAGE)?;
    println!("\nPlanned Listing Pages ({}):", planned.len());
    for url in &planned {
        println!("  - {}", url);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: storycrawl::config::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling up to {} articles from {}",
        config.crawl.max_items,
        config.crawl.base_url
    );

    let mut coordinator = Coordinator::new(config)?;

    // Ctrl-C requests a graceful stop; in-flight pages finish first
    let cancel = coordinator.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing in-flight requests");
            cancel.store(true, Ordering::Release);
        }
    });

    match coordinator.run().await {
        Ok(outcome) => {
            tracing::info!(
                "Crawl completed ({}): {} articles collected",
                outcome,
                coordinator.processed()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
