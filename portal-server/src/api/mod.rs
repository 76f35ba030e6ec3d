//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`stores`] - 门店接口
//! - [`orders`] - 订单状态与配送 OTP 接口
//! - [`wallet`] - 钱包与流水接口
//! - [`verification`] - 打款账户验证接口
//! - [`webhooks`] - 支付网关回调

pub mod convert;

pub mod health;
pub mod orders;
pub mod stores;
pub mod verification;
pub mod wallet;
pub mod webhooks;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();

    tracing::info!(target: "http_access", "{} {} {} {}ms", method, uri, status, elapsed_ms);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(stores::router())
        .merge(orders::router())
        .merge(wallet::router())
        .merge(verification::router())
        .merge(webhooks::router())
}

/// Build the stateful router with the full middleware stack
pub fn build_router(state: ServerState) -> Router {
    build_app()
        // JWT 认证中间件 - require_auth 内部会跳过公共路由
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}
