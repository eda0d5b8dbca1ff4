//! `GET /health` — liveness probe.

use axum::Json;

use crate::api::types::HealthResponse;
use crate::config;

pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: config::APP_VERSION,
    })
}
