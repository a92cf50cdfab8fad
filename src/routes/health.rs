//! Liveness endpoint

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
}

/// GET /ping - liveness check for load balancers
pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse { status: "ok" })
}
