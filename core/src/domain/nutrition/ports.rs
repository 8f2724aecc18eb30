use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    nutrition::entities::BackfillReport,
    recipe::entities::NutritionFacts,
};

/// A text-generation backend able to answer a prompt with JSON matching
/// the supplied schema.
pub trait LlmClient: Send + Sync {
    fn name(&self) -> &'static str;

    fn generate(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

pub trait NutritionService: Send + Sync {
    fn estimate_nutrition(
        &self,
        recipe_id: &str,
    ) -> impl Future<Output = Result<NutritionFacts, CoreError>> + Send;

    fn backfill_nutrition(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<BackfillReport, CoreError>> + Send;
}
