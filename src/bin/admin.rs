//! CLI administration tool for ephemeral-links.
//!
//! Inspects and maintains the link table without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Purge expired links now instead of waiting for the next sweep
//! cargo run --bin admin -- sweep
//!
//! # Create, inspect, and delete links
//! cargo run --bin admin -- link create https://example.com --single
//! cargo run --bin admin -- link show 1P8vYkR3xQe
//! cargo run --bin admin -- link delete 1P8vYkR3xQe
//!
//! # Link counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use ephemeral_links::application::services::LinkService;
use ephemeral_links::config::Config;
use ephemeral_links::domain::entities::Link;
use ephemeral_links::domain::expiration_sweeper::{DEFAULT_SWEEP_INTERVAL, ExpirationSweeper};
use ephemeral_links::domain::repositories::LinkRepository;
use ephemeral_links::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing ephemeral-links.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Delete every expired link now
    Sweep,

    /// Manage individual links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show link counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// Destination URL
        url: String,

        /// Delete the link after its first redirect
        #[arg(short, long)]
        single: bool,

        /// Expiry as Unix seconds
        #[arg(short, long)]
        expires: Option<i64>,
    },

    /// Show a link
    Show {
        /// Short code
        code: String,
    },

    /// Delete a link
    Delete {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));

    match cli.command {
        Commands::Sweep => handle_sweep(repo).await?,
        Commands::Link { action } => handle_link_action(action, repo).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Runs one expiration sweep and reports how many links were removed.
async fn handle_sweep(repo: Arc<PgLinkRepository>) -> Result<()> {
    println!("{}", "Sweeping expired links...".bright_blue());

    let sweeper = ExpirationSweeper::new(repo, DEFAULT_SWEEP_INTERVAL);
    let removed = sweeper
        .sweep_once()
        .await
        .map_err(|e| anyhow::anyhow!("Sweep failed: {}", e))?;

    println!(
        "{} {}",
        "Removed:".green().bold(),
        removed.to_string().bright_white().bold()
    );

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, repo: Arc<PgLinkRepository>) -> Result<()> {
    match action {
        LinkAction::Create {
            url,
            single,
            expires,
        } => {
            let service = LinkService::new(repo);
            let link = service
                .create_link(url, Some(single), expires)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

            println!("{}", "Link created".green().bold());
            print_link(&link);
        }
        LinkAction::Show { code } => {
            let link = repo
                .find_by_code(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Link not found")?;

            print_link(&link);
        }
        LinkAction::Delete { code, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete link '{}'?", code))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "Cancelled".red());
                    return Ok(());
                }
            }

            let deleted = repo
                .delete(&code)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

            if deleted {
                println!("{}", "Link deleted".green().bold());
            } else {
                println!("{}", "No link with that code".yellow());
            }
        }
    }

    Ok(())
}

fn print_link(link: &Link) {
    let status = if link.is_expired() {
        "EXPIRED".red()
    } else {
        "LIVE".green()
    };

    println!();
    println!("  Code:       {}", link.code.cyan());
    println!("  URL:        {}", link.url.bright_white());
    println!("  Single use: {}", link.single_use);
    println!(
        "  Expires:    {}",
        link.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Created:    {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!("  Status:     {}", status);
    println!();
}

/// Displays link counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let expired: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE expires_at <= $1")
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

    let single_use: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE single_use")
        .fetch_one(pool)
        .await?;

    println!("  Links:      {}", total.to_string().bright_green().bold());
    println!("  Expired:    {}", expired.to_string().bright_red().bold());
    println!(
        "  Single use: {}",
        single_use.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
