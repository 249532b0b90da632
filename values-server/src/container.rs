//! Composition root
//!
//! Wires repository -> use cases -> controller once at startup.

use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use crate::db::{DatabaseConfig, HealthStatus, SqlValueRepository, ValueRepository};
use crate::http::{build_router, ValueController};
use crate::usecases::{
    CreateValueUseCase, DeleteValueUseCase, GetAllValuesUseCase, GetHealthUseCase,
    GetValueUseCase, UpdateValueUseCase,
};

pub struct Container {
    repository: Arc<SqlValueRepository>,
    controller: Arc<ValueController>,
}

impl Container {
    pub fn new(repository: Arc<SqlValueRepository>) -> Self {
        let shared: Arc<dyn ValueRepository> = repository.clone();

        let controller = ValueController::new(
            GetAllValuesUseCase::new(shared.clone()),
            GetValueUseCase::new(shared.clone()),
            CreateValueUseCase::new(shared.clone()),
            UpdateValueUseCase::new(shared.clone()),
            DeleteValueUseCase::new(shared.clone()),
            GetHealthUseCase::new(shared),
        );

        Self {
            repository,
            controller: Arc::new(controller),
        }
    }

    /// Try the live database. Without a configuration the service stays on
    /// the fallback store.
    pub async fn initialize_database(&self, config: Option<&DatabaseConfig>) -> HealthStatus {
        let Some(config) = config else {
            warn!("Database configuration incomplete, running in demo mode");
            return self.repository.health_check().await;
        };

        let status = self.repository.initialize(config).await;
        info!(
            connected = status.connected,
            table_ready = status.table_ready,
            "Repository initialized"
        );
        status
    }

    pub fn controller(&self) -> Arc<ValueController> {
        self.controller.clone()
    }

    pub fn router(&self) -> Router {
        build_router(self.controller())
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new(Arc::new(SqlValueRepository::new()))
    }
}
