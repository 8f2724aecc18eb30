use ladle_core::domain::recipe::value_objects::SeedInput;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SeedRecipesValidator {
    #[validate(length(min = 1, message = "at least one cuisine is required"))]
    pub cuisines: Vec<String>,

    #[serde(default = "default_limit_per_cuisine")]
    #[validate(range(min = 1, max = 25, message = "limit_per_cuisine out of range"))]
    pub limit_per_cuisine: usize,
}

fn default_limit_per_cuisine() -> usize {
    10
}

impl From<SeedRecipesValidator> for SeedInput {
    fn from(value: SeedRecipesValidator) -> Self {
        SeedInput {
            cuisines: value.cuisines,
            limit_per_cuisine: value.limit_per_cuisine,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DedupQuery {
    /// Report duplicate groups without deleting anything.
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct BackfillQuery {
    /// Maximum number of recipes to estimate in one sweep.
    #[serde(default = "default_backfill_limit")]
    pub limit: usize,
}

fn default_backfill_limit() -> usize {
    20
}
