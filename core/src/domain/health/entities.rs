use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoreHealthStatus {
    pub reachable: bool,
    pub recipe_count: usize,
    pub response_time_ms: u64,
}
