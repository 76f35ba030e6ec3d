//! Wallet API Module
//!
//! Balance 和流水都是只读投影；变动只通过数据库函数发生。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Wallet router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/wallet", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_wallet))
        .route("/ledger", get(handler::ledger))
        .route("/withdraw", post(handler::withdraw))
}
