use axum::extract::{Path, State};
use ladle_core::domain::nutrition::ports::NutritionService;
use ladle_core::domain::recipe::entities::NutritionFacts;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeRecipeNutritionResponse {
    pub data: NutritionFacts,
}

#[utoipa::path(
    post,
    path = "/{recipe_id}/nutrition",
    tag = "nutrition",
    summary = "Estimate nutrition",
    description = "Estimates per-serving nutrition facts for a cached recipe and stores them on the record.",
    params(
        ("recipe_id" = String, Path, description = "Prefixed recipe id"),
    ),
    responses(
        (status = 200, body = AnalyzeRecipeNutritionResponse),
        (status = 404, description = "Unknown recipe"),
        (status = 503, description = "No estimation backend configured")
    )
)]
pub async fn analyze_recipe_nutrition(
    Path(recipe_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<AnalyzeRecipeNutritionResponse>, ApiError> {
    let facts = state
        .service
        .estimate_nutrition(&recipe_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeRecipeNutritionResponse { data: facts }))
}
