use axum::extract::{Path, State};
use ladle_core::domain::preference::{entities::MealPreferences, ports::PreferenceService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GetPreferencesResponse {
    pub data: MealPreferences,
}

#[utoipa::path(
    get,
    path = "/{profile_id}",
    tag = "preference",
    summary = "Get meal preferences",
    description = "Returns the stored preferences, or the defaults for an unknown profile.",
    params(
        ("profile_id" = String, Path, description = "Profile id"),
    ),
    responses(
        (status = 200, body = GetPreferencesResponse)
    )
)]
pub async fn get_preferences(
    Path(profile_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<GetPreferencesResponse>, ApiError> {
    let preferences = state
        .service
        .get_preferences(&profile_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetPreferencesResponse { data: preferences }))
}
