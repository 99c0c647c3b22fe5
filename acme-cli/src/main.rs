//! acme CLI - serve the post procedures and operate the database
//!
//! - `serve`: run the HTTP procedure server
//! - `db check`: manual connectivity check
//! - `db push`: create the post table over the direct endpoint
//! - `db url`: show resolved connection URLs (redacted)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "acme",
    author,
    version,
    about = "Post procedures over HTTP, backed by Postgres"
)]
struct Cli {
    /// Enable debug logging (shows redacted connection URLs)
    #[arg(long, global = true, env = "ACME_DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP procedure server
    Serve(commands::serve::ServeArgs),
    /// Database operations (check, push, url)
    Db(commands::db::DbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Db(args) => commands::run_db(args).await?,
    }
    Ok(())
}
