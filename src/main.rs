//! Playbill main entry point
//!
//! This is the command-line interface for the Playbill filmography crawler.

use anyhow::bail;
use clap::Parser;
use playbill::config::load_config_with_hash;
use playbill::crawler::crawl;
use playbill::sink::print_report;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Playbill: a polite filmography crawler
///
/// Playbill starts from a film page, follows the full-credits listing to
/// every credited actor's page, and writes one record per (actor, title)
/// credit, with a bounded fetch pool and a retry/dead-letter policy.
#[derive(Parser, Debug)]
#[command(name = "playbill")]
#[command(version = "0.1.0")]
#[command(about = "A polite filmography crawler", long_about = None)]
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

    /// Fail with a non-zero exit status if any URL was dead-lettered
    #[arg(long)]
    strict: bool,

    /// Validate config and show what would be crawled without crawling
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
    let (mut config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // The flag is an override; the config file can also set strict mode
    if cli.strict {
        config.crawl.strict = true;
    }

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("playbill=info,warn"),
            1 => EnvFilter::new("playbill=debug,info"),
            2 => EnvFilter::new("playbill=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would happen
fn handle_dry_run(config: &playbill::config::Config, config_hash: &str) {
    println!("=== Playbill Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Seed URL: {}", config.crawl.seed_url);
    println!(
        "  Max concurrent fetches: {}",
        config.crawl.max_concurrent_fetches
    );
    println!("  Retry ceiling: {}", config.crawl.retry_ceiling);
    println!(
        "  Request timeout: {}s",
        config.crawl.request_timeout_secs
    );
    println!("  Request delay: {}ms", config.crawl.request_delay_ms);
    println!("  Strict mode: {}", config.crawl.strict);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Records: {}", config.output.records_path);
    println!("  Report: {}", config.output.report_path);

    println!("\n✓ Configuration is valid (hash: {})", config_hash);
    println!("✓ Would start crawling from {}", config.crawl.seed_url);
}

/// Handles the main crawl operation
async fn handle_crawl(config: playbill::config::Config) -> anyhow::Result<()> {
    let strict = config.crawl.strict;
    let report_path = config.output.report_path.clone();

    tracing::info!("Starting crawl from {}", config.crawl.seed_url);

    let report = match crawl(config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_report(&report);
    report.write_markdown(Path::new(&report_path))?;
    tracing::info!("Report written to {}", report_path);

    if report.is_failure(strict) {
        bail!(
            "strict mode: {} URLs dead-lettered",
            report.dead_letters.len()
        );
    }

    Ok(())
}
