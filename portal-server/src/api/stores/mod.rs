//! Store API Module

pub(crate) mod handler;

pub(crate) use handler::resolve_owned_store;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Store router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/stores", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{store_code}", get(handler::get_by_code))
}
