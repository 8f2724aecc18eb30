use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, health::entities::StoreHealthStatus,
};

pub trait HealthCheckRepository: Send + Sync {
    fn readiness(&self) -> impl Future<Output = Result<StoreHealthStatus, CoreError>> + Send;

    /// Round-trip latency of the backing store, in milliseconds.
    fn health(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;
}

pub trait HealthCheckService: Send + Sync {
    fn readiness(&self) -> impl Future<Output = Result<StoreHealthStatus, CoreError>> + Send;

    fn health(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;
}
