//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    /// Keys in `kv_store` that hold a value
    pub stored_collections: Vec<String>,
}

/// Reports database reachability and which collections have been written
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let stored = sqlx::query_scalar::<_, String>(
        "SELECT key FROM kv_store WHERE value <> 'null'::jsonb ORDER BY key",
    )
    .fetch_all(&state.db)
    .await;

    let (status, database, stored_collections) = match stored {
        Ok(keys) => ("healthy", "connected", keys),
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            ("degraded", "disconnected", Vec::new())
        }
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
        stored_collections,
    })
}
