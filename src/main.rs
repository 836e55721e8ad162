//! CLI hosting application for the URL shortcode registry.
//!
//! Drives the registry service over a file-backed store without requiring
//! any server process.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL with a one-hour validity window
//! cargo run -- shorten https://example.com/article --validity 60
//!
//! # Shorten with a custom code
//! cargo run -- shorten https://example.com --code promo2026
//!
//! # Resolve a code (counts as a visit)
//! cargo run -- resolve promo2026
//!
//! # Inspect the registry
//! cargo run -- list
//! cargo run -- stats
//!
//! # Retire codes
//! cargo run -- deactivate promo2026
//! cargo run -- delete promo2026
//! cargo run -- clear
//! ```
//!
//! # Environment Variables
//!
//! See [`shortreg::config`] for the full list; everything has a default.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use shortreg::application::services::{RegistryService, StatsService};
use shortreg::config::{self, Config};
use shortreg::domain::clock::SystemClock;
use shortreg::error::AppError;
use shortreg::infrastructure::persistence::{FileKvStore, JsonRegistryStore};

type Store = JsonRegistryStore<FileKvStore>;
type Registry = RegistryService<Store, SystemClock>;
type Stats = StatsService<Store, SystemClock>;

/// CLI tool for managing the URL shortcode registry.
#[derive(Parser)]
#[command(name = "shortreg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten a long URL
    Shorten {
        /// The URL to shorten (absolute, http or https)
        url: String,

        /// Validity window in minutes (default: 30)
        #[arg(short, long)]
        validity: Option<i64>,

        /// Custom shortcode, 4-12 alphanumeric characters
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Resolve a shortcode to its target URL (counts as a visit)
    Resolve {
        /// The shortcode to resolve
        code: String,
    },

    /// List every registry entry
    List,

    /// Show registry statistics
    Stats,

    /// Soft-delete a shortcode so it no longer resolves
    Deactivate {
        /// The shortcode to deactivate
        code: String,
    },

    /// Remove a shortcode permanently
    Delete {
        /// The shortcode to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Remove every entry from the registry
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    init_tracing(&config);

    let kv = FileKvStore::new(config.store_dir.clone());
    let store = Arc::new(JsonRegistryStore::new(kv, config.store_key.clone()));
    let clock = Arc::new(SystemClock);

    let registry = RegistryService::new(store.clone(), clock.clone())
        .with_default_validity(config.default_validity_minutes);
    let stats = StatsService::new(store, clock);

    let outcome = match cli.command {
        Commands::Shorten {
            url,
            validity,
            code,
        } => handle_shorten(&registry, &config.base_url, &url, validity, code).await,
        Commands::Resolve { code } => handle_resolve(&registry, &code).await,
        Commands::List => handle_list(&registry).await,
        Commands::Stats => handle_stats(&stats).await,
        Commands::Deactivate { code } => handle_deactivate(&registry, &code).await,
        Commands::Delete { code, yes } => handle_delete(&registry, &code, yes).await,
        Commands::Clear { yes } => handle_clear(&registry, yes).await,
    };

    if let Err(e) = outcome {
        eprintln!("{} {}", format!("error[{}]:", e.code()).red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn handle_shorten(
    registry: &Registry,
    base_url: &str,
    url: &str,
    validity: Option<i64>,
    code: Option<String>,
) -> Result<(), AppError> {
    let record = registry.shorten(url, validity, code).await?;

    println!("{}", "Short URL created".green().bold());
    println!("  {:<10} {}", "Code:", record.shortcode.bold());
    println!(
        "  {:<10} {}",
        "Short URL:",
        registry.short_url(base_url, &record.shortcode)
    );
    println!("  {:<10} {}", "Target:", record.long_url);
    println!("  {:<10} {}", "Expires:", record.expiry_at);
    Ok(())
}

async fn handle_resolve(registry: &Registry, code: &str) -> Result<(), AppError> {
    let record = registry.resolve(code).await?;

    println!("{}", record.long_url);
    println!(
        "{}",
        format!("(visit {} recorded for '{}')", record.visits, record.shortcode).dimmed()
    );
    Ok(())
}

async fn handle_list(registry: &Registry) -> Result<(), AppError> {
    let entries = registry.list_all().await?;

    if entries.is_empty() {
        println!("{}", "Registry is empty.".dimmed());
        return Ok(());
    }

    println!(
        "{:<14} {:<8} {:<8} {:<22} TARGET",
        "CODE".bold(),
        "STATE".bold(),
        "VISITS".bold(),
        "EXPIRES".bold()
    );
    for entry in &entries {
        let state = if !entry.record.active {
            "inactive".yellow()
        } else if entry.is_expired {
            "expired".red()
        } else {
            "active".green()
        };

        println!(
            "{:<14} {:<8} {:<8} {:<22} {}",
            entry.record.shortcode,
            state,
            entry.record.visits,
            entry.record.expiry_at.format("%Y-%m-%d %H:%M:%S"),
            entry.record.long_url
        );
    }
    println!("{}", format!("{} entries", entries.len()).dimmed());
    Ok(())
}

async fn handle_stats(stats: &Stats) -> Result<(), AppError> {
    let report = stats.statistics().await?;

    println!("{}", "Registry statistics".bold());
    println!("  Total URLs:   {}", report.total_urls);
    println!("  Active URLs:  {}", report.active_urls.to_string().green());
    println!("  Expired URLs: {}", report.expired_urls.to_string().red());
    println!("  Total visits: {}", report.total_visits);

    if !report.top_urls.is_empty() {
        println!("  {}", "Top URLs by visits:".bold());
        for (rank, top) in report.top_urls.iter().enumerate() {
            println!(
                "    {}. {:<14} {:>6} {}",
                rank + 1,
                top.shortcode,
                top.visits,
                top.long_url.dimmed()
            );
        }
    }
    Ok(())
}

async fn handle_deactivate(registry: &Registry, code: &str) -> Result<(), AppError> {
    let record = registry.deactivate(code).await?;
    println!(
        "{} '{}' no longer resolves",
        "Deactivated".yellow().bold(),
        record.shortcode
    );
    Ok(())
}

async fn handle_delete(registry: &Registry, code: &str, yes: bool) -> Result<(), AppError> {
    if !yes && !confirm(&format!("Permanently delete '{code}'?"))? {
        println!("Aborted.");
        return Ok(());
    }

    let removed = registry.delete_by_code(code).await?;
    println!(
        "{} '{}' ({})",
        "Deleted".red().bold(),
        removed.shortcode,
        removed.long_url
    );
    Ok(())
}

async fn handle_clear(registry: &Registry, yes: bool) -> Result<(), AppError> {
    if !yes && !confirm("Remove every entry from the registry?")? {
        println!("Aborted.");
        return Ok(());
    }

    registry.clear_all().await?;
    println!("{}", "Registry cleared".red().bold());
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| {
            AppError::internal(
                "Confirmation prompt failed",
                json!({ "reason": e.to_string() }),
            )
        })
}
