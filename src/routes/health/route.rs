use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

pub fn create_route() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
