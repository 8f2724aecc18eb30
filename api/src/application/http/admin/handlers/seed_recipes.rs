use axum::extract::State;
use ladle_core::domain::recipe::{ports::RecipeService, value_objects::SeedReport};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::auth::AdminGuard;
use crate::application::http::admin::validators::SeedRecipesValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeedRecipesResponse {
    pub data: SeedReport,
}

#[utoipa::path(
    post,
    path = "/seed",
    tag = "admin",
    summary = "Seed recipes",
    description = "Fetches recipes for the given cuisines from every configured provider.",
    request_body = SeedRecipesValidator,
    responses(
        (status = 200, body = SeedRecipesResponse),
        (status = 401, description = "Invalid admin token"),
        (status = 503, description = "Admin endpoints disabled")
    )
)]
pub async fn seed_recipes(
    _guard: AdminGuard,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<SeedRecipesValidator>,
) -> Result<Response<SeedRecipesResponse>, ApiError> {
    let report = state
        .service
        .seed_recipes(payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SeedRecipesResponse { data: report }))
}
