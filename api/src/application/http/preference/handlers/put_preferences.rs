use axum::extract::{Path, State};
use ladle_core::domain::preference::{entities::MealPreferences, ports::PreferenceService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::preference::validators::PutPreferencesValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PutPreferencesResponse {
    pub data: MealPreferences,
}

#[utoipa::path(
    put,
    path = "/{profile_id}",
    tag = "preference",
    summary = "Replace meal preferences",
    description = "Replaces the whole preferences document for a profile.",
    params(
        ("profile_id" = String, Path, description = "Profile id"),
    ),
    request_body = PutPreferencesValidator,
    responses(
        (status = 200, body = PutPreferencesResponse)
    )
)]
pub async fn put_preferences(
    Path(profile_id): Path<String>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<PutPreferencesValidator>,
) -> Result<Response<PutPreferencesResponse>, ApiError> {
    let preferences = state
        .service
        .put_preferences(&profile_id, payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(PutPreferencesResponse { data: preferences }))
}
