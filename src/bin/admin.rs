//! CLI administration tool for shorty.
//!
//! Runs maintenance operations out of band from request serving.
//!
//! # Usage
//!
//! ```bash
//! # Reset the counter and delete every URL (asks for confirmation)
//! cargo run --bin admin -- init
//!
//! # Remove URLs not visited for MAX_DAYS_TO_STORE days (or --days N)
//! cargo run --bin admin -- cleanup --days 30
//!
//! # Show stored URL count and counter value
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection string
//! - `MAX_DAYS_TO_STORE`: default retention for `cleanup` (default: 90, at most 36500)
//! - `RUST_LOG`: log filter for maintenance output (default: `warn`)
//!
//! `cleanup` is safe to run from cron while the server is serving traffic.

use shorty::application::services::MaintenanceService;
use shorty::config::{Config, load_from_env, validate_retention_days};
use shorty::infrastructure::Storage;
use shorty::logging;
use shorty::infrastructure::persistence::{PgIdAllocator, PgUrlRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorty storage.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Reset the id counter and delete all stored URLs
    Init {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete URLs that have not been visited recently
    Cleanup {
        /// Retention period in days (defaults to MAX_DAYS_TO_STORE)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Show storage statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

type PgMaintenance = MaintenanceService<PgIdAllocator, PgUrlRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    logging::init(&log_level, "text")?;

    let config = load_from_env().context("Invalid configuration")?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let pool = Arc::new(pool);

    let maintenance = MaintenanceService::new(
        Arc::new(PgIdAllocator::new(pool.clone())),
        Arc::new(PgUrlRepository::new(pool.clone())),
    );

    match cli.command {
        Commands::Init { yes } => init(&maintenance, yes).await?,
        Commands::Cleanup { days } => cleanup(&maintenance, &config, days).await?,
        Commands::Stats => stats(&maintenance).await?,
        Commands::Db { action } => handle_db_action(action, pool).await?,
    }

    Ok(())
}

/// Resets storage after confirmation.
async fn init(maintenance: &PgMaintenance, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Initialize Storage".bright_blue().bold());
    println!();
    println!(
        "{}",
        "⚠️  This deletes ALL shortened URLs and resets the id counter to 0."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Continue?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    maintenance
        .initialize()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage: {}", e))?;

    println!();
    println!("{}", "✅ Storage initialized".green().bold());
    println!();

    Ok(())
}

/// Deletes records idle for longer than the retention period.
async fn cleanup(maintenance: &PgMaintenance, config: &Config, days: Option<u32>) -> Result<()> {
    let days = match days {
        Some(d) => {
            validate_retention_days(d).context("Invalid --days")?;
            d
        }
        None => config.max_days_to_store,
    };

    println!(
        "{} {}",
        "🗑️  Removing URLs not visited in the last".bright_blue(),
        format!("{days} days").bright_white().bold()
    );

    let deleted = maintenance
        .cleanup_days(days)
        .await
        .map_err(|e| anyhow::anyhow!("Cleanup failed: {}", e))?;

    println!(
        "{} {}",
        "✅ Deleted:".green().bold(),
        deleted.to_string().bright_white().bold()
    );

    Ok(())
}

/// Displays storage statistics.
///
/// Shows:
/// - Number of stored URLs
/// - Current counter value (last id handed out)
/// - Ids with no record behind them (cleaned up or never written)
async fn stats(maintenance: &PgMaintenance) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let summary = maintenance
        .summary()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read statistics: {}", e))?;

    println!(
        "  Stored URLs:   {}",
        summary.stored_urls.to_string().bright_green().bold()
    );
    println!(
        "  Counter:       {}",
        summary.url_count.to_string().bright_green().bold()
    );
    println!(
        "  Vacant ids:    {}",
        summary.vacant_ids().to_string().bright_black()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: Arc<PgPool>) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let storage = Storage::postgres(pool);
            storage
                .url_repository
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "📦 Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool.as_ref())
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
