//! HTTP layer
//!
//! Axum server with:
//! - Value CRUD and health routes under `/api`
//! - CORS and request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod controller;
pub mod error;
pub mod routes;
pub mod server;

pub use controller::ValueController;
pub use error::ApiError;
pub use server::{build_router, run_server, ServerConfig, ServerError};
