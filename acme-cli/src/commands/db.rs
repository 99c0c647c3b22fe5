//! Database commands
//!
//! Commands: check, push, url

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use acme_db::diagnostics::check_connection;
use acme_db::pool::{create_pool, create_pool_for};
use acme_db::{migrations, ConnectionMode, DatabaseConfig};

#[derive(Parser, Debug)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbCommands,
}

#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// Check connectivity: server time and existing tables
    Check,
    /// Create the post table (over the direct, non-pooled endpoint)
    Push,
    /// Show the pooled and direct connection URLs, password redacted
    Url,
}

pub async fn run_db(args: DbArgs) -> Result<()> {
    let config = DatabaseConfig::from_env().context("Invalid database configuration")?;
    config.trace_resolved();

    match args.command {
        DbCommands::Check => run_check(&config).await,
        DbCommands::Push => run_push(&config).await,
        DbCommands::Url => run_url(&config),
    }
}

async fn run_check(config: &DatabaseConfig) -> Result<()> {
    println!("Testing database connection...");

    let report = async {
        let pool = create_pool(config).await?;
        let report = check_connection(&pool).await;
        pool.close().await;
        Ok::<_, anyhow::Error>(report?)
    }
    .await
    .map_err(|e| {
        tracing::error!("Database connection failed: {:#}", e);
        e.context("Database connection failed")
    })?;

    println!("Database connection successful");
    println!("Current time from database: {}", report.current_time.to_rfc3339());
    println!("Available tables:");
    for table in &report.tables {
        println!("  - {}", table);
    }
    if !report.schema_ready() {
        println!("post table missing; run `acme db push`");
    }

    Ok(())
}

async fn run_push(config: &DatabaseConfig) -> Result<()> {
    let direct = config
        .url_for(ConnectionMode::Direct)
        .context("Cannot derive direct database URL")?;

    let pool = create_pool_for(&direct, config)
        .await
        .context("Failed to connect to direct endpoint")?;
    let result = migrations::run(&pool).await.context("Schema push failed");
    pool.close().await;
    result?;

    println!("Schema up to date ({})", direct);
    Ok(())
}

fn run_url(config: &DatabaseConfig) -> Result<()> {
    for (label, mode) in [("pooled", ConnectionMode::Pooled), ("direct", ConnectionMode::Direct)] {
        let url = config
            .url_for(mode)
            .with_context(|| format!("Cannot derive {} database URL", label))?;
        println!("{}: {}", label, url);
    }
    Ok(())
}
