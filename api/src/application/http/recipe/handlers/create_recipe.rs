use axum::extract::State;
use ladle_core::domain::recipe::entities::Recipe;
use ladle_core::domain::recipe::ports::RecipeService;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::recipe::validators::CreateRecipeValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub data: Recipe,
}

#[utoipa::path(
    post,
    path = "",
    tag = "recipe",
    summary = "Create recipe",
    description = "Creates a user-sourced recipe in the local cache.",
    request_body = CreateRecipeValidator,
    responses(
        (status = 201, body = CreateRecipeResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CreateRecipeValidator>,
) -> Result<Response<CreateRecipeResponse>, ApiError> {
    let recipe = state
        .service
        .create_recipe(payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CreateRecipeResponse { data: recipe }))
}
