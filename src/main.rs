//! Squad-Scout main entry point
//!
//! This is the command-line interface for the Squad-Scout player gatherer.

use clap::{Parser, Subcommand};
use squad_scout::config::{load_config_with_hash, Config};
use squad_scout::crawler::{Coordinator, MAX_BATCH_SIZE};
use squad_scout::output::{load_statistics, print_statistics};
use squad_scout::server::{app, serve, AppState};
use squad_scout::storage::open_storage;
use squad_scout::{GatheringMode, Identity};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Squad-Scout: a rate-limited player discovery engine
///
/// Squad-Scout walks the teammate graph of CS2 players on Leetify, pages
/// through a banned-player directory, and caches every profile it resolves
/// in a local SQLite database.
#[derive(Parser, Debug)]
#[command(name = "squad-scout")]
#[command(version = "1.0.0")]
#[command(about = "A rate-limited player discovery engine", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the gathering control surface until Ctrl-C
    Serve {
        /// Start background gathering immediately in this mode (BANNED or RANDOM)
        #[arg(long, value_name = "MODE")]
        gather: Option<GatheringMode>,

        /// Profiles per batch when --gather is given
        #[arg(long, default_value_t = MAX_BATCH_SIZE, requires = "gather")]
        batch_size: u32,
    },

    /// Crawl the teammate network from one or more seeds
    Crawl {
        /// Steam64 id to start from (repeatable)
        #[arg(long = "seed", value_name = "STEAM64_ID", required = true)]
        seeds: Vec<String>,

        /// Number of profiles to collect
        #[arg(long, default_value_t = 50)]
        target: usize,
    },

    /// Run one pass over the banned-player directory
    Banned {
        /// Number of profiles to collect
        #[arg(long, default_value_t = 50)]
        target: usize,
    },

    /// Show statistics from the database and exit
    Stats,

    /// Validate config and show what would run without touching the network
    DryRun,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match cli.command {
        Command::DryRun => handle_dry_run(&config),
        Command::Stats => handle_stats(config),
        Command::Crawl { seeds, target } => handle_crawl(config, seeds, target).await,
        Command::Banned { target } => handle_banned(config, target).await,
        Command::Serve { gather, batch_size } => handle_serve(config, gather, batch_size).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("squad_scout=info,warn"),
            1 => EnvFilter::new("squad_scout=debug,info"),
            2 => EnvFilter::new("squad_scout=trace,debug"),
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

/// Handles `dry-run`: prints the validated configuration
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Squad-Scout Dry Run ===\n");

    println!("API:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Banned list URL: {}", config.api.banned_list_url);
    println!("  User agent: {}", config.api.user_agent);
    println!(
        "  API key: {}",
        if config.api.api_key.is_empty() { "(none)" } else { "(set)" }
    );

    println!("\nRate Limits:");
    for (name, limiter) in [
        ("profile-api", &config.rate_limits.profile_api),
        ("match-api", &config.rate_limits.match_api),
        ("banned-list-api", &config.rate_limits.banned_list_api),
    ] {
        println!(
            "  {}: {} call(s) per {}ms",
            name, limiter.limit_for_period, limiter.refresh_period_ms
        );
    }

    println!("\nCrawler:");
    println!("  Match candidate cap: {}", config.crawler.match_candidate_cap);

    println!("\nBanned List:");
    println!("  Page size: {}", config.banned.page_size);
    println!("  Max pages per pass: {}", config.banned.max_pages);
    println!("  Start page: {}", config.banned.start_page);

    println!("\nGathering:");
    println!(
        "  Delay between batches: {}ms",
        config.gathering.delay_between_batches
    );
    println!("  Error retry delay: {}ms", config.gathering.error_retry_delay);

    println!("\nStorage:");
    println!("  Database: {}", config.storage.database_path);

    println!("\nServer:");
    println!("  Bind address: {}", config.server.bind_address);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles `stats`: shows statistics from the database
fn handle_stats(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("Database: {}\n", config.storage.database_path);

    // Open the database
    let store = open_storage(Path::new(&config.storage.database_path))?;

    // Load statistics
    let stats = load_statistics(&store)?;

    print_statistics(&stats);

    Ok(())
}

/// Handles `crawl`: a foreground teammate-network crawl
async fn handle_crawl(
    config: Config,
    seeds: Vec<String>,
    target: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let seeds: Vec<Identity> = seeds.into_iter().map(Identity::new).collect();
    let coordinator = Coordinator::new(config)?;

    let profiles = coordinator.crawler().crawl_from(&seeds, target).await;

    println!("Collected {} profile(s):", profiles.len());
    for profile in &profiles {
        println!(
            "  {} {} (win rate {:.2}, {} matches{})",
            profile.steam_id,
            profile.name,
            profile.win_rate,
            profile.total_matches,
            if profile.has_ban() { ", banned" } else { "" }
        );
    }

    Ok(())
}

/// Handles `banned`: one foreground pass over the banned-player directory
async fn handle_banned(config: Config, target: usize) -> Result<(), Box<dyn std::error::Error>> {
    let coordinator = Coordinator::new(config)?;

    let profiles = coordinator.pager().gather_banned(target).await;

    println!("Collected {} banned player profile(s):", profiles.len());
    for profile in &profiles {
        println!("  {} {}", profile.steam_id, profile.name);
    }
    println!("Next pass starts at page {}", coordinator.pager().next_page());

    Ok(())
}

/// Handles `serve`: runs the control surface until Ctrl-C
async fn handle_serve(
    config: Config,
    gather: Option<GatheringMode>,
    batch_size: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = config.server.bind_address.parse()?;
    let coordinator = Coordinator::new(config)?;
    let scheduler = coordinator.scheduler();

    if let Some(mode) = gather {
        scheduler.start(mode, batch_size)?;
    }

    let router = app(AppState::new(scheduler.clone()));
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
        tracing::info!("Shutdown requested");
    };

    serve(addr, router, shutdown).await?;

    scheduler.shutdown().await;
    tracing::info!("Squad-Scout stopped");

    Ok(())
}
