use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    maintenance::entities::{CacheStats, DedupReport},
};

pub trait MaintenanceService: Send + Sync {
    /// Collapses recipes sharing a normalized title, keeping the most
    /// complete record of each group. `dry_run` reports without deleting.
    fn dedup_recipes(
        &self,
        dry_run: bool,
    ) -> impl Future<Output = Result<DedupReport, CoreError>> + Send;

    fn cache_stats(&self) -> impl Future<Output = Result<CacheStats, CoreError>> + Send;
}
