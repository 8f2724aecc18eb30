use axum::extract::{Path, State};
use ladle_core::domain::recipe::ports::RecipeService;

use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[utoipa::path(
    delete,
    path = "/{recipe_id}",
    tag = "recipe",
    summary = "Delete recipe",
    params(
        ("recipe_id" = String, Path, description = "Prefixed recipe id"),
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 404, description = "Unknown recipe")
    )
)]
pub async fn delete_recipe(
    Path(recipe_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<()>, ApiError> {
    state
        .service
        .delete_recipe(&recipe_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::NoContent)
}
