//! acme-db: the Post schema and everything needed to reach it
//!
//! - `schema`: persisted row shape plus validated creation input
//! - `config`: connection URL resolution (pooled vs. direct endpoint)
//! - `client`: the `PostStore` seam with Postgres and in-memory backends
//! - `migrations`: idempotent table bootstrap over the direct endpoint
//! - `diagnostics`: manual connectivity check

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod schema;

pub use client::{Database, DeleteOutcome, InsertOutcome, MemoryPostStore, PgPostStore, PostStore};
pub use config::{ConfigError, ConnectionMode, ConnectionUrl, DatabaseConfig};
pub use error::DbError;
pub use schema::{CreatePostSchema, NewPost, Post, ValidationError};
