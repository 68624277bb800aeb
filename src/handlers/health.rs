use axum::{extract::State, response::Json};
use serde_json::json;

use crate::{errors::Result, handlers::AppState};

#[utoipa::path(
    get,
    path = "/health/live",
    responses((status = 200, description = "Process is up")),
    tag = "health"
)]
pub async fn liveness() -> Result<Json<serde_json::Value>> {
    Ok(Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

#[utoipa::path(
    get,
    path = "/health/ready",
    responses((status = 200, description = "Store backend reachability")),
    tag = "health"
)]
pub async fn readiness(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    // Probe the account store through its ordinary read path.
    let store_status = match state.stores.accounts.get("__readiness-probe__").await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let overall_status = if store_status == "healthy" {
        "ready"
    } else {
        "not_ready"
    };

    Ok(Json(json!({
        "status": overall_status,
        "checks": {
            "store": store_status,
            "backend": state.config.store_backend
        },
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
