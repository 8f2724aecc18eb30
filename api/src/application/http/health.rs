use axum::{Router, extract::State, routing::get};
use ladle_core::domain::health::ports::HealthCheckService;
use serde::{Deserialize, Serialize};

use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub response_time_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub recipe_count: usize,
    pub response_time_ms: u64,
}

async fn health(State(state): State<AppState>) -> Result<Response<HealthResponse>, ApiError> {
    let response_time_ms = state.service.health().await.map_err(ApiError::from)?;

    Ok(Response::OK(HealthResponse {
        status: "ok".to_string(),
        response_time_ms,
    }))
}

async fn ready(State(state): State<AppState>) -> Result<Response<ReadinessResponse>, ApiError> {
    let status = state.service.readiness().await.map_err(ApiError::from)?;

    Ok(Response::OK(ReadinessResponse {
        status: "ready".to_string(),
        recipe_count: status.recipe_count,
        response_time_ms: status.response_time_ms,
    }))
}

pub fn health_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/health"), get(health))
        .route(&format!("{root_path}/health/ready"), get(ready))
}
