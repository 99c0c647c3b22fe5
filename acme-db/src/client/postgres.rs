//! Postgres-backed post store

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{next_post_id, DeleteOutcome, InsertOutcome, PostStore};
use crate::error::DbResult;
use crate::schema::{NewPost, Post};

/// Post repository over a sqlx pool
#[derive(Debug, Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn find_many(&self, limit: u32) -> DbResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, created_at, updated_at
            FROM post
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn find_first(&self, id: Uuid) -> DbResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, created_at, updated_at
            FROM post
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn insert(&self, post: NewPost) -> DbResult<InsertOutcome> {
        let id = next_post_id();
        let result = sqlx::query(
            r#"
            INSERT INTO post (id, title, content)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(id)
        .bind(post.title.as_str())
        .bind(post.content.as_str())
        .execute(&self.pool)
        .await?;

        tracing::debug!(%id, "post inserted");
        Ok(InsertOutcome {
            id,
            row_count: result.rows_affected(),
        })
    }

    async fn delete(&self, id: Uuid) -> DbResult<DeleteOutcome> {
        let result = sqlx::query("DELETE FROM post WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(%id, rows = result.rows_affected(), "post delete");
        Ok(DeleteOutcome {
            row_count: result.rows_affected(),
        })
    }

    async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
