use super::handlers::analyze_recipe_nutrition::{
    __path_analyze_recipe_nutrition, analyze_recipe_nutrition,
};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(analyze_recipe_nutrition))]
pub struct NutritionApiDoc;

pub fn nutrition_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new().route(
        &format!("{root_path}/api/recipes/{{recipe_id}}/nutrition"),
        post(analyze_recipe_nutrition),
    )
}
