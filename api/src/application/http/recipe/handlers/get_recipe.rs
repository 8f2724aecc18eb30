use axum::extract::{Path, State};
use ladle_core::domain::recipe::entities::Recipe;
use ladle_core::domain::recipe::ports::RecipeService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GetRecipeResponse {
    pub data: Recipe,
}

#[utoipa::path(
    get,
    path = "/{recipe_id}",
    tag = "recipe",
    summary = "Get recipe",
    description = "Returns a cached recipe, fetching it from its upstream provider on a miss.",
    params(
        ("recipe_id" = String, Path, description = "Prefixed recipe id, e.g. `mealdb-52772`"),
    ),
    responses(
        (status = 200, body = GetRecipeResponse),
        (status = 404, description = "Unknown recipe")
    )
)]
pub async fn get_recipe(
    Path(recipe_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<GetRecipeResponse>, ApiError> {
    let recipe = state
        .service
        .get_recipe(&recipe_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetRecipeResponse { data: recipe }))
}
