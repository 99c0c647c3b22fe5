//! Database client - typed query/mutation surface over the `post` table
//!
//! # Design Principles
//!
//! - `PostStore` is the seam the router depends on (real + in-memory impls)
//! - Every statement is parameterized, never string-built from input
//! - One statement per operation, no multi-step transactions
//! - Identifiers are UUIDv7, so `ORDER BY id DESC` is newest first

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::error::DbResult;
use crate::pool;
use crate::schema::{NewPost, Post};

pub use memory::MemoryPostStore;
pub use postgres::PgPostStore;

/// Result of an insert: the assigned identity and affected rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub id: Uuid,
    pub row_count: u64,
}

/// Result of a delete: affected rows (0 when nothing matched)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub row_count: u64,
}

/// Query and mutation surface for posts (testable)
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Newest posts first, at most `limit`.
    async fn find_many(&self, limit: u32) -> DbResult<Vec<Post>>;

    /// The post with this id, if any.
    async fn find_first(&self, id: Uuid) -> DbResult<Option<Post>>;

    /// Insert a validated post, assigning its identifier.
    async fn insert(&self, post: NewPost) -> DbResult<InsertOutcome>;

    /// Hard-delete by id.
    async fn delete(&self, id: Uuid) -> DbResult<DeleteOutcome>;

    /// Cheap reachability check.
    async fn ping(&self) -> DbResult<()> {
        self.find_many(1).await.map(|_| ())
    }
}

/// Allocate a new post identifier.
///
/// UUIDv7 embeds a millisecond timestamp and is ordered within the process,
/// which keeps identifier order aligned with creation order.
pub(crate) fn next_post_id() -> Uuid {
    Uuid::now_v7()
}

/// Connected database handle.
///
/// Constructed once at startup and passed to whatever needs it; dropping
/// or closing it releases the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to the pooled endpoint.
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        let pool = pool::create_pool(config).await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Post store backed by this database.
    pub fn posts(&self) -> PgPostStore {
        PgPostStore::new(self.pool.clone())
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
