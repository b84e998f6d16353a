use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::api::HealthStatus;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// The frontend is up if it answers; the backend's own report rides along.
async fn health(State(state): State<AppState>) -> Json<Value> {
    let backend = match state.api.health().await {
        Ok(body) => match serde_json::from_value::<HealthStatus>(body.clone()) {
            Ok(status) if !status.status.is_empty() => json!(status),
            _ => {
                tracing::debug!(%body, "Unexpected backend health payload");
                body
            }
        },
        Err(e) => {
            tracing::warn!("Backend health check failed: {}", e);
            json!("unreachable")
        }
    };

    Json(json!({
        "status": "ok",
        "backend": backend,
    }))
}
