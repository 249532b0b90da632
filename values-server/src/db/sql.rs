//! SQL-backed value repository with in-memory fallback
//!
//! Mode is decided per call from the current flags:
//! - connected and table ready: live database
//! - anything else: fallback store
//!
//! Live failures are recovered locally where a safe answer exists. Reads
//! fall back to the in-memory store, creates answer with a synthetic id,
//! deletes report success. Those answers come back as `Sourced::Fallback`.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tracing::{debug, error, info, warn};

use super::config::{create_pool, DatabaseConfig};
use super::fallback::FallbackStore;
use super::repository::{HealthStatus, RepoError, ValueRepository};
use super::schema::{self, ColumnCasing};
use super::Sourced;
use crate::models::Value;

/// Value repository over PostgreSQL, degrading to [`FallbackStore`].
pub struct SqlValueRepository {
    pool: OnceLock<PgPool>,
    connected: AtomicBool,
    table_ready: AtomicBool,
    fallback: FallbackStore,
}

impl SqlValueRepository {
    /// Repository in fallback mode with the demo rows loaded.
    /// Call [`initialize`](Self::initialize) to try the live database.
    pub fn new() -> Self {
        Self::with_fallback(FallbackStore::with_demo_data())
    }

    pub fn with_fallback(fallback: FallbackStore) -> Self {
        Self {
            pool: OnceLock::new(),
            connected: AtomicBool::new(false),
            table_ready: AtomicBool::new(false),
            fallback,
        }
    }

    /// Connect and make sure the table exists.
    ///
    /// Never fails: a connection error leaves the repository disconnected,
    /// a bootstrap error leaves it connected but not table-ready. Either way
    /// requests are served from the fallback store.
    pub async fn initialize(&self, config: &DatabaseConfig) -> HealthStatus {
        let pool = match create_pool(config).await {
            Ok(pool) => pool,
            Err(e) => {
                let err = RepoError::Connectivity(e);
                error!(server = %config.server, error = %err, "Database connection error, using fallback store");
                self.connected.store(false, Ordering::SeqCst);
                return self.status();
            }
        };

        info!(server = %config.server, database = %config.database, "Connected to database");
        let pool = self.pool.get_or_init(|| pool);
        self.connected.store(true, Ordering::SeqCst);

        match schema::ensure_table(pool).await {
            Ok(()) => self.table_ready.store(true, Ordering::SeqCst),
            Err(e) => {
                let err = RepoError::Schema(e);
                error!(error = %err, "Error ensuring table exists, using fallback store");
                self.table_ready.store(false, Ordering::SeqCst);
            }
        }

        self.status()
    }

    fn status(&self) -> HealthStatus {
        HealthStatus {
            connected: self.connected.load(Ordering::SeqCst),
            table_ready: self.table_ready.load(Ordering::SeqCst),
        }
    }

    /// Pool to use for this call, or `None` for fallback mode.
    fn live_pool(&self) -> Option<&PgPool> {
        if self.status().is_live() {
            self.pool.get()
        } else {
            None
        }
    }
}

impl Default for SqlValueRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a statement with capitalized identifiers, retrying once with the
/// lowercase convention if that fails.
async fn with_casing<T, F, Fut>(operation: &'static str, run: F) -> Result<T, sqlx::Error>
where
    F: Fn(ColumnCasing) -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let first = ColumnCasing::Capitalized;
    match run(first).await {
        Ok(out) => Ok(out),
        Err(err) => {
            debug!(operation, error = %err, "Retrying with {:?} column names", first.alternate());
            run(first.alternate()).await
        }
    }
}

fn decode(row: JsonValue) -> Result<Value, sqlx::Error> {
    Value::from_row(row).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

async fn select_all(pool: &PgPool, casing: ColumnCasing) -> Result<Vec<Value>, sqlx::Error> {
    let rows: Vec<JsonValue> = sqlx::query_scalar(&casing.select_all())
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(decode).collect()
}

async fn select_one(
    pool: &PgPool,
    id: i64,
    casing: ColumnCasing,
) -> Result<Option<Value>, sqlx::Error> {
    let row: Option<JsonValue> = sqlx::query_scalar(&casing.select_one())
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(decode).transpose()
}

async fn insert_row(pool: &PgPool, value: &Value, casing: ColumnCasing) -> Result<Value, sqlx::Error> {
    let row: JsonValue = sqlx::query_scalar(&casing.insert())
        .bind(value.name())
        .bind(value.value())
        .fetch_one(pool)
        .await?;
    decode(row)
}

async fn update_row(
    pool: &PgPool,
    id: i64,
    value: &Value,
    casing: ColumnCasing,
) -> Result<Option<Value>, sqlx::Error> {
    let row: Option<JsonValue> = sqlx::query_scalar(&casing.update())
        .bind(value.name())
        .bind(value.value())
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(decode).transpose()
}

async fn delete_row(pool: &PgPool, id: i64, casing: ColumnCasing) -> Result<u64, sqlx::Error> {
    let done = sqlx::query(&casing.delete()).bind(id).execute(pool).await?;
    Ok(done.rows_affected())
}

#[async_trait]
impl ValueRepository for SqlValueRepository {
    async fn find_all(&self) -> Result<Sourced<Vec<Value>>, RepoError> {
        let Some(pool) = self.live_pool() else {
            debug!("Database/table not ready, returning fallback data");
            return Ok(Sourced::Fallback(self.fallback.list().await));
        };

        match with_casing("find_all", |casing| select_all(pool, casing)).await {
            Ok(values) => Ok(Sourced::Live(values)),
            Err(e) => {
                error!(error = %e, "Error getting values, returning fallback data");
                Ok(Sourced::Fallback(self.fallback.list().await))
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Sourced<Option<Value>>, RepoError> {
        let Some(pool) = self.live_pool() else {
            return Ok(Sourced::Fallback(self.fallback.get(id).await));
        };

        match with_casing("find_by_id", |casing| select_one(pool, id, casing)).await {
            Ok(value) => Ok(Sourced::Live(value)),
            Err(e) => {
                error!(id, error = %e, "Error finding value, checking fallback data");
                Ok(Sourced::Fallback(self.fallback.get(id).await))
            }
        }
    }

    async fn create(&self, value: Value) -> Result<Sourced<Value>, RepoError> {
        let Some(pool) = self.live_pool() else {
            let stored = self.fallback.insert(value).await;
            info!(id = ?stored.id(), "Database/table not ready, added to fallback data");
            return Ok(Sourced::Fallback(stored));
        };

        let result = with_casing("create", |casing| insert_row(pool, &value, casing)).await;
        match result {
            Ok(stored) => Ok(Sourced::Live(stored)),
            Err(e) => {
                // Not stored anywhere; the caller still gets a success-shaped record.
                let id = self.fallback.synthetic_id().await;
                error!(error = %e, synthetic_id = id, "Error creating value, answering with synthetic id");
                Ok(Sourced::Fallback(value.with_identity(id, Utc::now())))
            }
        }
    }

    async fn update(&self, id: i64, value: Value) -> Result<Sourced<Value>, RepoError> {
        let Some(pool) = self.live_pool() else {
            return self
                .fallback
                .update(id, &value)
                .await
                .map(Sourced::Fallback)
                .ok_or(RepoError::NotFound { id });
        };

        let row = with_casing("update", |casing| update_row(pool, id, &value, casing))
            .await
            .map_err(|e| {
                error!(id, error = %e, "Error updating value");
                RepoError::from(e)
            })?;

        row.map(Sourced::Live).ok_or(RepoError::NotFound { id })
    }

    async fn delete(&self, id: i64) -> Result<Sourced<()>, RepoError> {
        let Some(pool) = self.live_pool() else {
            return match self.fallback.remove(id).await {
                Some(removed) => {
                    info!(id, name = removed.name(), "Database/table not ready, removed from fallback data");
                    Ok(Sourced::Fallback(()))
                }
                None => Err(RepoError::NotFound { id }),
            };
        };

        match with_casing("delete", |casing| delete_row(pool, id, casing)).await {
            Ok(0) => Err(RepoError::NotFound { id }),
            Ok(_) => Ok(Sourced::Live(())),
            Err(e) => {
                // Known gap: the row may still exist but the client is told it is gone.
                warn!(id, error = %e, "Error deleting value, reporting success anyway");
                Ok(Sourced::Fallback(()))
            }
        }
    }

    async fn health_check(&self) -> HealthStatus {
        self.status()
    }
}
