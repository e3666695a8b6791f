//! CLI administration tool for linkshortener.
//!
//! Works directly against the PostgreSQL store, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/a
//!
//! # Resolve a short code
//! cargo run --bin admin -- resolve 3fa9c1
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `linkshortener::config`); `STORAGE_BACKEND` must
//! be `postgres`.

use linkshortener::application::services::{ResolveService, ShortenOptions, ShortenService};
use linkshortener::config::{self, Config, StorageBackend};
use linkshortener::domain::NoopObserver;
use linkshortener::domain::repositories::LinkRepository;
use linkshortener::infrastructure::persistence::PgLinkRepository;
use linkshortener::server::connect_pool;
use linkshortener::utils::code_generator::HexCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linkshortener.
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
    /// Create a short link
    Shorten {
        /// URL to shorten
        url: String,
    },

    /// Look up the URL behind a short code
    Resolve {
        /// Short code
        code: String,
    },

    /// Show statistics
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

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("admin requires STORAGE_BACKEND=postgres");
    }

    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Shorten { url } => shorten(&config, &pool, &url).await?,
        Commands::Resolve { code } => resolve(&pool, &code).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn repository(pool: &PgPool) -> Arc<PgLinkRepository> {
    Arc::new(PgLinkRepository::new(Arc::new(pool.clone())))
}

/// Allocates a short code with the same settings as the server.
async fn shorten(config: &Config, pool: &PgPool, url: &str) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let service = ShortenService::new(
        repository(pool),
        Arc::new(HexCodeGenerator),
        Arc::new(NoopObserver),
        ShortenOptions {
            code_length: config.code_length,
            max_attempts: config.max_attempts,
            store_error_policy: config.store_error_policy,
        },
    );

    let code = service
        .shorten(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("  URL:       {}", url.cyan());
    println!("  Code:      {}", code.bright_yellow().bold());
    println!(
        "  Short URL: {}",
        format!("{}/{}", config.short_url_base, code).bright_green()
    );
    println!();

    Ok(())
}

async fn resolve(pool: &PgPool, code: &str) -> Result<()> {
    println!("{}", "🔎 Resolve short code".bright_blue().bold());
    println!();

    let service = ResolveService::new(repository(pool), Arc::new(NoopObserver));

    match service.resolve(code).await {
        Ok(url) => {
            println!("  Code: {}", code.bright_yellow());
            println!("  URL:  {}", url.cyan());
        }
        Err(linkshortener::AppError::NotFound { .. }) => {
            println!("{}", format!("  No link with code '{}'", code).yellow());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to resolve code: {}", e)),
    }
    println!();

    Ok(())
}

/// Displays the number of stored links.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count = repository(pool)
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    println!(
        "  Links: {}",
        links_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            repository(pool)
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))
                .context("Database connection failed")?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
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
