use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CacheStats {
    pub total_recipes: usize,
    pub by_source: BTreeMap<String, usize>,
    pub with_nutrition: usize,
    pub without_nutrition: usize,
    pub distinct_cuisines: usize,
    pub search_cache_entries: usize,
}

/// One group of recipes sharing a normalized title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DedupGroup {
    pub title_key: String,
    pub kept_id: String,
    pub deleted_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DedupReport {
    pub scanned: usize,
    pub groups_with_duplicates: usize,
    pub kept: usize,
    pub deleted: usize,
    pub dry_run: bool,
    pub groups: Vec<DedupGroup>,
}
