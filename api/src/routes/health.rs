use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/health
///
/// Liveness probe; reports the service name and environment.
async fn health() -> Json<ApiResponse<Value>> {
    let config = common::config::Config::get();
    Json(ApiResponse::success(
        json!({
            "service": config.project_name,
            "env": config.env,
        }),
        "Service is healthy",
    ))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}
