//! Order API Module
//!
//! Orders are created by the ordering system; the portal reads them, moves
//! them through the status machine and validates delivery OTPs.

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stores/{store_code}/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{order_id}", get(handler::get_by_id))
        .route("/{order_id}/status", patch(handler::update_status))
        .route("/{order_id}/otp/validate", post(handler::validate_otp))
}
