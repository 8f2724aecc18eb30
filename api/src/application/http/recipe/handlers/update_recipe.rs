use axum::extract::{Path, State};
use ladle_core::domain::recipe::entities::Recipe;
use ladle_core::domain::recipe::ports::RecipeService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::recipe::validators::UpdateRecipeValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateRecipeResponse {
    pub data: Recipe,
}

#[utoipa::path(
    put,
    path = "/{recipe_id}",
    tag = "recipe",
    summary = "Update recipe",
    description = "Applies a partial update; omitted fields keep their stored values.",
    params(
        ("recipe_id" = String, Path, description = "Prefixed recipe id"),
    ),
    request_body = UpdateRecipeValidator,
    responses(
        (status = 200, body = UpdateRecipeResponse),
        (status = 404, description = "Unknown recipe")
    )
)]
pub async fn update_recipe(
    Path(recipe_id): Path<String>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<UpdateRecipeValidator>,
) -> Result<Response<UpdateRecipeResponse>, ApiError> {
    let recipe = state
        .service
        .update_recipe(&recipe_id, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(UpdateRecipeResponse { data: recipe }))
}
