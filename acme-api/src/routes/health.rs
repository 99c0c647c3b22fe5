//! `GET /health` - liveness plus post store reachability
//!
//! Answers 200 `ok` when the store responds and 503 `degraded` when it
//! does not. The store error is logged, never returned.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthReport>) {
    let (status, database, code) = match state.posts.ping().await {
        Ok(()) => ("ok", "reachable", StatusCode::OK),
        Err(e) => {
            tracing::warn!("health: post store unreachable: {}", e);
            ("degraded", "unreachable", StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    let report = HealthReport {
        status,
        database,
        version: env!("CARGO_PKG_VERSION"),
    };
    (code, Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenAuthenticator;
    use acme_db::MemoryPostStore;

    #[tokio::test]
    async fn reachable_store_is_ok() {
        let state = AppState::new(
            Arc::new(MemoryPostStore::new()),
            Arc::new(StaticTokenAuthenticator::default()),
        );
        let (code, Json(report)) = health(State(Arc::new(state))).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(report.status, "ok");
        assert_eq!(report.database, "reachable");
    }
}
