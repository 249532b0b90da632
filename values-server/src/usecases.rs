//! Use cases - one repository operation each
//!
//! Every use case returns an [`Envelope`]. Input validation happens here,
//! before storage is touched. Whether a result came from the live database or
//! the fallback store is logged and then dropped; callers see one shape.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::db::{HealthStatus, RepoError, Sourced, ValueRepository};
use crate::models::{parse_id, ValidationError, Value};

/// Category of a use case failure, used by the controller to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unexpected,
}

/// Failure half of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct UseCaseError {
    pub kind: ErrorKind,
    pub message: String,
}

impl UseCaseError {
    pub fn not_found() -> Self {
        Self {
            kind: ErrorKind::NotFound,
            message: "Value not found".to_string(),
        }
    }
}

impl From<ValidationError> for UseCaseError {
    fn from(e: ValidationError) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: e.to_string(),
        }
    }
}

impl From<RepoError> for UseCaseError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound { .. } => Self::not_found(),
            other => Self {
                kind: ErrorKind::Unexpected,
                message: other.to_string(),
            },
        }
    }
}

/// Uniform result wrapper: `{success: true, data, message?}` or
/// `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<T> {
    Success { data: T, message: Option<String> },
    Failure(UseCaseError),
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self::Success { data, message: None }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self::Success {
            data,
            message: Some(message.into()),
        }
    }

    pub fn failure(error: impl Into<UseCaseError>) -> Self {
        Self::Failure(error.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Unwrap a repository result, noting when it was served by the fallback store.
fn settle<T>(operation: &'static str, sourced: Sourced<T>) -> T {
    if sourced.is_fallback() {
        debug!(operation, "Served by fallback store");
    }
    sourced.into_inner()
}

/// List every value.
pub struct GetAllValuesUseCase {
    repository: Arc<dyn ValueRepository>,
}

impl GetAllValuesUseCase {
    pub fn new(repository: Arc<dyn ValueRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Envelope<Vec<Value>> {
        match self.repository.find_all().await {
            Ok(values) => Envelope::success(settle("find_all", values)),
            Err(e) => Envelope::failure(e),
        }
    }
}

/// Fetch one value by id.
pub struct GetValueUseCase {
    repository: Arc<dyn ValueRepository>,
}

impl GetValueUseCase {
    pub fn new(repository: Arc<dyn ValueRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, raw_id: &str) -> Envelope<Value> {
        let id = match parse_id(raw_id) {
            Ok(id) => id,
            Err(e) => return Envelope::failure(e),
        };

        match self.repository.find_by_id(id).await {
            Ok(found) => match settle("find_by_id", found) {
                Some(value) => Envelope::success(value),
                None => Envelope::failure(UseCaseError::not_found()),
            },
            Err(e) => Envelope::failure(e),
        }
    }
}

/// Validate and store a new value.
pub struct CreateValueUseCase {
    repository: Arc<dyn ValueRepository>,
}

impl CreateValueUseCase {
    pub fn new(repository: Arc<dyn ValueRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, name: &str, value: &str) -> Envelope<Value> {
        let entity = Value::new(name, value);
        if let Err(e) = entity.validate() {
            return Envelope::failure(e);
        }

        match self.repository.create(entity).await {
            Ok(saved) => Envelope::with_message(settle("create", saved), "Value created successfully"),
            Err(e) => Envelope::failure(e),
        }
    }
}

/// Replace name and value of an existing record.
pub struct UpdateValueUseCase {
    repository: Arc<dyn ValueRepository>,
}

impl UpdateValueUseCase {
    pub fn new(repository: Arc<dyn ValueRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, raw_id: &str, name: &str, value: &str) -> Envelope<Value> {
        let id = match parse_id(raw_id) {
            Ok(id) => id,
            Err(e) => return Envelope::failure(e),
        };

        let entity = Value::new(name, value);
        if let Err(e) = entity.validate() {
            return Envelope::failure(e);
        }

        match self.repository.update(id, entity).await {
            Ok(saved) => Envelope::with_message(settle("update", saved), "Value updated successfully"),
            Err(e) => Envelope::failure(e),
        }
    }
}

/// Remove a value by id.
pub struct DeleteValueUseCase {
    repository: Arc<dyn ValueRepository>,
}

impl DeleteValueUseCase {
    pub fn new(repository: Arc<dyn ValueRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, raw_id: &str) -> Envelope<()> {
        let id = match parse_id(raw_id) {
            Ok(id) => id,
            Err(e) => return Envelope::failure(e),
        };

        match self.repository.delete(id).await {
            Ok(done) => Envelope::with_message(settle("delete", done), "Value deleted successfully"),
            Err(e) => Envelope::failure(e),
        }
    }
}

/// Service mode derived from the repository flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Production,
    Demo,
}

impl From<HealthStatus> for Mode {
    fn from(status: HealthStatus) -> Self {
        if status.is_live() {
            Self::Production
        } else {
            Self::Demo
        }
    }
}

/// Health response body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub message: String,
    pub database: &'static str,
    pub table_ready: bool,
    pub mode: Mode,
    pub timestamp: DateTime<Utc>,
}

/// Report connectivity, table readiness and mode.
pub struct GetHealthUseCase {
    repository: Arc<dyn ValueRepository>,
}

impl GetHealthUseCase {
    pub fn new(repository: Arc<dyn ValueRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Envelope<HealthReport> {
        let status = self.repository.health_check().await;

        Envelope::success(HealthReport {
            status: "OK",
            message: format!("API is running - v{}", env!("CARGO_PKG_VERSION")),
            database: if status.connected {
                "Connected"
            } else {
                "Not connected"
            },
            table_ready: status.table_ready,
            mode: Mode::from(status),
            timestamp: Utc::now(),
        })
    }
}
