use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::state::AppState;

/// GET /health
/// Returns service status plus dataset and history sizes.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let analyses_count = match state.store.count().await {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("Health check could not count analyses: {e:#}");
            None
        }
    };
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "analyses_count": analyses_count,
        "roles_loaded": state.taxonomy.role_count(),
    }))
}
