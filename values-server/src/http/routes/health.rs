//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, response::Response, routing::get, Router};

use crate::http::server::AppState;

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> Response {
    state.controller.health().await
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
