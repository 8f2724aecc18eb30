use super::handlers::backfill_nutrition::{__path_backfill_nutrition, backfill_nutrition};
use super::handlers::get_stats::{__path_get_stats, get_stats};
use super::handlers::run_dedup::{__path_run_dedup, run_dedup};
use super::handlers::seed_recipes::{__path_seed_recipes, seed_recipes};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(seed_recipes, get_stats, run_dedup, backfill_nutrition))]
pub struct AdminApiDoc;

pub fn admin_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/api/admin/seed"), post(seed_recipes))
        .route(&format!("{root_path}/api/admin/stats"), get(get_stats))
        .route(&format!("{root_path}/api/admin/dedup"), post(run_dedup))
        .route(
            &format!("{root_path}/api/admin/backfill-nutrition"),
            post(backfill_nutrition),
        )
}
