//! Database layer - repository contract, SQL implementation, fallback store
//!
//! # Design Principles
//!
//! - One repository value owns all state (pool, flags, fallback store)
//! - Live vs fallback decided per call, never cached per record
//! - Live and fallback records are never merged
//! - Casing differences handled at the row boundary, not in callers

pub mod config;
pub mod fallback;
pub mod repository;
pub mod schema;
pub mod sourced;
pub mod sql;

pub use config::{create_pool, DatabaseConfig};
pub use fallback::FallbackStore;
pub use repository::{HealthStatus, RepoError, ValueRepository};
pub use sourced::Sourced;
pub use sql::SqlValueRepository;
