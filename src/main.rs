//! Urlsweep main entry point
//!
//! Command-line interface for the batch URL fetcher.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use urlsweep::config::{load_config_with_hash, validate, Config};
use urlsweep::fetch::run_batch;
use urlsweep::input::read_urls_from_file;

/// Urlsweep: a bounded-parallel batch URL fetcher
///
/// Fetches every URL in the input file over HTTP with a fixed concurrency
/// limit, classifies each outcome, and appends one JSON record per line to
/// the results file as fetches complete.
#[derive(Parser, Debug)]
#[command(name = "urlsweep")]
#[command(version)]
#[command(about = "Fetch a batch of URLs with bounded parallelism", long_about = None)]
struct Cli {
    /// Path to a text file with one URL per line
    #[arg(value_name = "URLS_FILE")]
    urls_file: PathBuf,

    /// Path to TOML configuration file (all options have defaults)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Results file path (overrides the config file)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Maximum number of requests in flight at once (overrides the config file)
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Per-request deadline in seconds (overrides the config file)
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Decode 200-response bodies as JSON and persist them
    #[arg(long)]
    capture_payload: bool,

    /// Write non-success records to the results file
    #[arg(long, conflicts_with = "no_persist_failures")]
    persist_failures: bool,

    /// Only count non-success records, do not write them
    #[arg(long)]
    no_persist_failures: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config, count URLs, and exit without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration (defaults when no file is given)
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);

    // Re-validate after CLI overrides
    validate(&config).context("Invalid configuration")?;

    let urls = read_urls_from_file(&cli.urls_file)
        .with_context(|| format!("Failed to read URLs from {}", cli.urls_file.display()))?;

    if cli.dry_run {
        handle_dry_run(&config, urls.len());
        return Ok(());
    }

    let summary = run_batch(&config, urls).await?;

    println!("Batch Summary");
    println!("=============");
    println!("Total:     {}", summary.total);
    println!("Succeeded: {}", summary.succeeded);
    println!("Failed:    {}", summary.failed);
    println!("Success rate: {:.1}%", summary.success_rate());
    println!("Results: {}", config.output.results_path);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("urlsweep=info,warn"),
            1 => EnvFilter::new("urlsweep=debug,info"),
            2 => EnvFilter::new("urlsweep=trace,debug"),
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

/// Applies CLI flag overrides onto the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(output) = &cli.output {
        config.output.results_path = output.to_string_lossy().into_owned();
    }
    if let Some(concurrency) = cli.concurrency {
        config.fetch.concurrency_limit = concurrency;
    }
    if let Some(timeout) = cli.timeout_secs {
        config.fetch.request_timeout_secs = timeout;
    }
    if cli.capture_payload {
        config.fetch.capture_payload = true;
    }
    if cli.persist_failures {
        config.output.persist_failures = Some(true);
    }
    if cli.no_persist_failures {
        config.output.persist_failures = Some(false);
    }
}

/// Handles the --dry-run mode: shows what would be fetched
fn handle_dry_run(config: &Config, url_count: usize) {
    println!("=== Urlsweep Dry Run ===\n");

    println!("Fetch Configuration:");
    println!("  Concurrency limit: {}", config.fetch.concurrency_limit);
    println!(
        "  Request timeout: {}s",
        config.fetch.request_timeout_secs
    );
    println!("  Capture payload: {}", config.fetch.capture_payload);
    println!("  User agent: {}", config.fetch.user_agent);

    println!("\nOutput:");
    println!("  Results: {}", config.output.results_path);
    println!("  Persist failures: {}", config.persist_failures());

    println!("\n✓ Configuration is valid");
    println!("✓ Would fetch {} URLs", url_count);
}
