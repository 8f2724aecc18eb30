use axum::extract::State;
use ladle_core::domain::maintenance::{entities::CacheStats, ports::MaintenanceService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::auth::AdminGuard;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GetStatsResponse {
    pub data: CacheStats,
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "admin",
    summary = "Cache statistics",
    responses(
        (status = 200, body = GetStatsResponse),
        (status = 401, description = "Invalid admin token"),
        (status = 503, description = "Admin endpoints disabled")
    )
)]
pub async fn get_stats(
    _guard: AdminGuard,
    State(state): State<AppState>,
) -> Result<Response<GetStatsResponse>, ApiError> {
    let stats = state.service.cache_stats().await.map_err(ApiError::from)?;

    Ok(Response::OK(GetStatsResponse { data: stats }))
}
