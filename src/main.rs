//! Restock-Watch main entry point
//!
//! This is the command-line interface for the Restock-Watch product monitor.

use anyhow::Context;
use clap::Parser;
use restock_watch::config::{load_config, Config};
use restock_watch::monitor::{run_monitor, PacingPolicy, TokioPause};
use restock_watch::notify::DiscordNotifier;
use restock_watch::output::print_summary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Restock-Watch: checks product pages and announces restocks
///
/// Restock-Watch fetches each compiled-in product page once, infers whether
/// the item can be bought, and posts a Discord message for every available
/// item. Requires DISCORD_BOT_TOKEN and DISCORD_CHANNEL_ID.
#[derive(Parser, Debug)]
#[command(name = "restock-watch")]
#[command(version = "1.0.0")]
#[command(about = "Checks product pages and announces restocks", long_about = None)]
struct Cli {
    /// Path to an optional TOML settings file
    #[arg(short, long, value_name = "SETTINGS")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate configuration and list targets without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // A local .env file may provide the credentials
    dotenvy::dotenv().ok();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e).context("failed to load configuration");
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_run(&config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("restock_watch=info,warn"),
            1 => EnvFilter::new("restock_watch=debug,info"),
            2 => EnvFilter::new("restock_watch=trace,debug"),
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

/// Handles the --dry-run mode: shows what would be checked
fn handle_dry_run(config: &Config) {
    let pacing = PacingPolicy::from(&config.settings.schedule);

    println!("=== Restock-Watch Dry Run ===\n");

    println!("Schedule:");
    println!("  Delay after each target: {:?}", pacing.delay);
    println!("  Jitter: up to {:?}", pacing.jitter);
    println!("  Request timeout: {:?}", config.settings.http.timeout());

    println!("\nNotify:");
    println!("  API base: {}", config.settings.notify.api_base);
    println!("  Channel: {}", config.credentials.channel_id);

    println!("\nTargets ({}):", config.targets.len());
    for target in &config.targets {
        println!("  - {} (shared as {})", target, target.short_url());
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main monitoring pass
async fn handle_run(config: &Config, quiet: bool) -> anyhow::Result<()> {
    tracing::info!("Checking {} targets", config.targets.len());

    let notifier = DiscordNotifier::new(&config.credentials, &config.settings.notify)
        .context("failed to set up Discord notifier")?;

    let summary = run_monitor(config, &notifier, &TokioPause)
        .await
        .context("failed to start monitor")?;

    if !quiet {
        print_summary(&summary);
    }

    if summary.errors() > 0 {
        tracing::warn!(
            "{} of {} targets could not be checked",
            summary.errors(),
            summary.checked()
        );
    }

    Ok(())
}
