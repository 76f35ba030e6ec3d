//! Webhook API Module
//!
//! 网关回调不走 JWT，认证靠请求体的 HMAC 签名。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Webhook router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/webhooks/razorpay", post(handler::razorpay))
}
