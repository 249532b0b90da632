//! values-server: HTTP server for the values API
//!
//! A small CRUD service over one table. The repository serves from the live
//! database when it is reachable and the table is ready, and from an
//! in-memory fallback store otherwise, without changing the response shape.

pub mod container;
pub mod db;
pub mod http;
pub mod models;
pub mod usecases;

pub use container::Container;
pub use db::{DatabaseConfig, HealthStatus, SqlValueRepository, ValueRepository};
pub use http::{run_server, ServerConfig};
