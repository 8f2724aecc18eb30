use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of a backfill sweep over the details cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BackfillReport {
    pub scanned: usize,
    pub estimated: usize,
    pub skipped: usize,
    pub failed: usize,
}
