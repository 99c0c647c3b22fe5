//! HTTP server command
//!
//! Resolves the database configuration first: without `POSTGRES_URL` the
//! command fails before anything is bound or served.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use acme_api::auth::TOKENS_ENV;
use acme_api::{run_server, AppState, ServerConfig, StaticTokenAuthenticator};
use acme_db::{Database, DatabaseConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3000", env = "ACME_BIND")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = DatabaseConfig::from_env().context("Invalid database configuration")?;
    config.trace_resolved();

    let authenticator = StaticTokenAuthenticator::from_env();
    if authenticator.is_empty() {
        tracing::warn!(
            "{} not set: post.create and post.delete will reject every call",
            TOKENS_ENV
        );
    }

    let db = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;

    let state = AppState::new(Arc::new(db.posts()), Arc::new(authenticator));
    let server_config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    tracing::info!("Starting acme server on {}", args.bind);
    let result = run_server(state, server_config).await.context("Server error");

    db.close().await;
    result
}
