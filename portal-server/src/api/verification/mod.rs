//! Payout Verification API Module
//!
//! 验证结论由支付网关给出；这里只做每日尝试限额和记录。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Verification router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/verification", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/bank", post(handler::verify_bank))
        .route("/upi", post(handler::verify_upi))
}
