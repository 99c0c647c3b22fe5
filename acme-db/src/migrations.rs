//! Schema bootstrap for the `post` table
//!
//! Idempotent `CREATE ... IF NOT EXISTS`; run it over the direct endpoint.

use sqlx::PgPool;

use crate::error::DbResult;

/// Create the `post` table if it does not exist.
pub async fn run(pool: &PgPool) -> DbResult<()> {
    tracing::info!("Ensuring post table exists...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS post (
            id UUID PRIMARY KEY,
            title VARCHAR(256) NOT NULL,
            content TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::pool::create_pool_for;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn bootstrap_is_idempotent() {
        let config = DatabaseConfig::from_env().expect("POSTGRES_URL required");
        let direct = config.direct_url().expect("pooled URL required");
        let pool = create_pool_for(&direct, &config).await.expect("pool creation failed");

        run(&pool).await.expect("first run failed");
        run(&pool).await.expect("second run failed");
    }
}
