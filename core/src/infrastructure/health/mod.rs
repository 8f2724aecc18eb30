use std::sync::{Arc, RwLock};
use std::time::Instant;

use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    health::{entities::StoreHealthStatus, ports::HealthCheckRepository},
};
use crate::infrastructure::store::DocumentStore;

/// Health probe over the recipe details collection.
#[derive(Debug, Clone)]
pub struct StoreHealthCheck {
    store: Arc<RwLock<DocumentStore>>,
}

impl StoreHealthCheck {
    pub fn new(store: Arc<RwLock<DocumentStore>>) -> Self {
        Self { store }
    }
}

impl HealthCheckRepository for StoreHealthCheck {
    async fn readiness(&self) -> Result<StoreHealthStatus, CoreError> {
        let started = Instant::now();
        let store = self.store.read().map_err(|e| {
            error!("recipe store lock poisoned: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(StoreHealthStatus {
            reachable: true,
            recipe_count: store.len(),
            response_time_ms: started.elapsed().as_millis() as u64,
        })
    }

    async fn health(&self) -> Result<u64, CoreError> {
        let started = Instant::now();
        let _ = self
            .store
            .read()
            .map_err(|e| {
                error!("recipe store lock poisoned: {}", e);
                CoreError::InternalServerError
            })?
            .len();

        Ok(started.elapsed().as_millis() as u64)
    }
}
