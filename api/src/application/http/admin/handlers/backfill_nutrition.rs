use axum::extract::{Query, State};
use ladle_core::domain::nutrition::{entities::BackfillReport, ports::NutritionService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::auth::AdminGuard;
use crate::application::http::admin::validators::BackfillQuery;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BackfillNutritionResponse {
    pub data: BackfillReport,
}

#[utoipa::path(
    post,
    path = "/backfill-nutrition",
    tag = "admin",
    summary = "Backfill nutrition",
    description = "Estimates nutrition for cached recipes that do not have it yet.",
    params(BackfillQuery),
    responses(
        (status = 200, body = BackfillNutritionResponse),
        (status = 401, description = "Invalid admin token"),
        (status = 503, description = "Admin endpoints disabled or no LLM backend configured")
    )
)]
pub async fn backfill_nutrition(
    _guard: AdminGuard,
    Query(params): Query<BackfillQuery>,
    State(state): State<AppState>,
) -> Result<Response<BackfillNutritionResponse>, ApiError> {
    let report = state
        .service
        .backfill_nutrition(params.limit)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(BackfillNutritionResponse { data: report }))
}
