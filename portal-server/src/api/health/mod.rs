//! Health API Module

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// 探活接口，不触库
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}
