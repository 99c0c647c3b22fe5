//! Database error type

/// Errors raised by the database client.
///
/// Not-found is deliberately absent: lookups return `Option` instead.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;
