//! Service banner at `/`

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Banner response
#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: [&'static str; 2],
}

/// GET /
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Values API is running",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ["/api/values", "/api/health"],
    })
}

/// Root routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(root))
}
