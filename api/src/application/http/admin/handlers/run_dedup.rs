use axum::extract::{Query, State};
use ladle_core::domain::maintenance::{entities::DedupReport, ports::MaintenanceService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::auth::AdminGuard;
use crate::application::http::admin::validators::DedupQuery;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RunDedupResponse {
    pub data: DedupReport,
}

#[utoipa::path(
    post,
    path = "/dedup",
    tag = "admin",
    summary = "Deduplicate recipes",
    description = "Collapses recipes sharing a normalized title, keeping the most complete copy.",
    params(DedupQuery),
    responses(
        (status = 200, body = RunDedupResponse),
        (status = 401, description = "Invalid admin token"),
        (status = 503, description = "Admin endpoints disabled")
    )
)]
pub async fn run_dedup(
    _guard: AdminGuard,
    Query(params): Query<DedupQuery>,
    State(state): State<AppState>,
) -> Result<Response<RunDedupResponse>, ApiError> {
    let report = state
        .service
        .dedup_recipes(params.dry_run)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(RunDedupResponse { data: report }))
}
