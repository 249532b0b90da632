//! Repository contract for value storage

use async_trait::async_trait;
use serde::Serialize;

use super::Sourced;
use crate::models::Value;

/// Repository error type
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Value not found")]
    NotFound { id: i64 },

    /// Database unreachable. Absorbed into fallback mode during initialize.
    #[error("database connection failed: {0}")]
    Connectivity(#[source] sqlx::Error),

    /// Table probe/bootstrap failed. Absorbed into fallback mode during initialize.
    #[error("table bootstrap failed: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Unexpected(#[from] sqlx::Error),
}

/// Connectivity and schema-readiness flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub connected: bool,
    pub table_ready: bool,
}

impl HealthStatus {
    /// True when requests are served by the live database.
    pub fn is_live(&self) -> bool {
        self.connected && self.table_ready
    }
}

/// Storage for values.
///
/// Implementations decide per call whether the live store or the fallback
/// store serves the request, and report which one did through [`Sourced`].
#[async_trait]
pub trait ValueRepository: Send + Sync + 'static {
    /// All records, ascending by id.
    async fn find_all(&self) -> Result<Sourced<Vec<Value>>, RepoError>;

    /// One record, `None` when absent.
    async fn find_by_id(&self, id: i64) -> Result<Sourced<Option<Value>>, RepoError>;

    /// Persist a validated value, returning it with id and timestamp.
    async fn create(&self, value: Value) -> Result<Sourced<Value>, RepoError>;

    /// Replace name/value of an existing record.
    async fn update(&self, id: i64, value: Value) -> Result<Sourced<Value>, RepoError>;

    async fn delete(&self, id: i64) -> Result<Sourced<()>, RepoError>;

    /// Current flags. Never fails, no side effects.
    async fn health_check(&self) -> HealthStatus;
}
