//! Manual connectivity check
//!
//! One trivial query plus a listing of tables in the `public` schema.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::DbResult;
use crate::schema::POST_TABLE;

/// What the connectivity check found
#[derive(Debug, Clone)]
pub struct ConnectionReport {
    /// Server clock at the time of the check
    pub current_time: DateTime<Utc>,
    /// Tables in the `public` schema, sorted
    pub tables: Vec<String>,
}

impl ConnectionReport {
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.iter().any(|t| t == name)
    }

    /// Whether the `post` table has been created
    pub fn schema_ready(&self) -> bool {
        self.has_table(POST_TABLE)
    }
}

/// Run the check. Fails on the first query error, no retry.
pub async fn check_connection(pool: &PgPool) -> DbResult<ConnectionReport> {
    let (current_time,): (DateTime<Utc>,) = sqlx::query_as("SELECT NOW() AS current_time")
        .fetch_one(pool)
        .await?;

    let tables: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT table_name::text
        FROM information_schema.tables
        WHERE table_schema = 'public'
        ORDER BY table_name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(ConnectionReport {
        current_time,
        tables: tables.into_iter().map(|(name,)| name).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_table_lookup() {
        let report = ConnectionReport {
            current_time: Utc::now(),
            tables: vec!["post".into(), "users".into()],
        };
        assert!(report.schema_ready());
        assert!(report.has_table("users"));
        assert!(!report.has_table("sessions"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn check_against_live_database() {
        let config = crate::DatabaseConfig::from_env().expect("POSTGRES_URL required");
        let pool = crate::pool::create_pool(&config).await.expect("pool creation failed");
        let report = check_connection(&pool).await.expect("check failed");
        assert!(report.current_time.timestamp() > 0);
    }
}
