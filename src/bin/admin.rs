//! CLI administration tool for cdv-shortener.
//!
//! Works directly against the database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply migrations
//! cargo run --bin admin -- db migrate
//!
//! # Create a short link (prompts for the URL when omitted)
//! cargo run --bin admin -- url create https://example.com --slug promo
//!
//! # Show where a slug points
//! cargo run --bin admin -- url show promo
//!
//! # View statistics
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `cdv_shortener::config`.

use cdv_shortener::application::services::UrlService;
use cdv_shortener::config;
use cdv_shortener::domain::repositories::UrlRepository;
use cdv_shortener::error::AppError;
use cdv_shortener::infrastructure::persistence::PgUrlRepository;
use cdv_shortener::server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing cdv-shortener.
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
    /// Manage short links
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Short link subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// Create a short link
    Create {
        /// Target URL (prompted for when omitted)
        url: Option<String>,

        /// Custom slug (random when omitted)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Show the URL a slug redirects to
    Show {
        /// Slug to look up (exact match)
        slug: String,
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

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let pool = server::connect_pool(&config).await?;

    let repository: Arc<dyn UrlRepository> =
        Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
    let service = UrlService::new(repository, config.self_domain.clone());

    match cli.command {
        Commands::Url { action } => handle_url_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches short link commands.
async fn handle_url_action(action: UrlAction, service: &UrlService) -> Result<()> {
    match action {
        UrlAction::Create { url, slug } => create_url(service, url, slug).await,
        UrlAction::Show { slug } => show_url(service, &slug).await,
    }
}

/// Creates a short link through the same flow as `POST /url`.
async fn create_url(service: &UrlService, url: Option<String>, slug: Option<String>) -> Result<()> {
    println!("{}", "Create short link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Target URL").interact_text()?,
    };

    match service.create(Some(url), slug).await {
        Ok(mapping) => {
            println!("{}", "Short link created".green().bold());
            println!("  Slug: {}", mapping.slug.bright_yellow().bold());
            println!("  URL:  {}", mapping.url.cyan());
            println!(
                "  Link: https://{}/{}",
                service.self_domain(),
                mapping.slug
            );
            println!();
            Ok(())
        }
        Err(e @ (AppError::Validation(_)
        | AppError::SelfReference { .. }
        | AppError::SlugConflict { .. })) => {
            println!("{} {}", "Rejected:".red().bold(), e);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to create short link: {}", e)),
    }
}

/// Prints the mapping stored under `slug`.
async fn show_url(service: &UrlService, slug: &str) -> Result<()> {
    match service.resolve(slug).await {
        Ok(mapping) => {
            println!("  Slug:    {}", mapping.slug.bright_yellow());
            println!("  URL:     {}", mapping.url.cyan());
            println!(
                "  Created: {}",
                mapping
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
            Ok(())
        }
        Err(AppError::NotFound) => {
            println!("{}", format!("  No short link for '{slug}'").yellow());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Database error: {}", e)),
    }
}

/// Displays the number of stored short links.
async fn handle_stats(service: &UrlService) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let total = service
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    println!(
        "  Short links: {}",
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK".green().bold());
            println!("  {}", version.bright_black());
        }
        DbAction::Migrate => {
            server::migrate(pool).await?;
            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(())
}
