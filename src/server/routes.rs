//! Axum router configuration.

use crate::server::handlers::{add_entry, parse_name, summary};
use crate::server::ServerState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Create the application router
pub fn create_router(state: Arc<RwLock<ServerState>>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/parse", post(parse_name))
        .route("/entry", post(add_entry))
        .route("/summary", get(summary))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
