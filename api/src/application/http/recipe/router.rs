use super::handlers::create_recipe::{__path_create_recipe, create_recipe};
use super::handlers::delete_recipe::{__path_delete_recipe, delete_recipe};
use super::handlers::get_recipe::{__path_get_recipe, get_recipe};
use super::handlers::search_recipes::{__path_search_recipes, search_recipes};
use super::handlers::update_recipe::{__path_update_recipe, update_recipe};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    search_recipes,
    get_recipe,
    create_recipe,
    update_recipe,
    delete_recipe
))]
pub struct RecipeApiDoc;

pub fn recipe_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(&format!("{root_path}/api/recipes"), get(search_recipes))
        .route(&format!("{root_path}/api/recipes"), post(create_recipe))
        .route(
            &format!("{root_path}/api/recipes/{{recipe_id}}"),
            get(get_recipe),
        )
        .route(
            &format!("{root_path}/api/recipes/{{recipe_id}}"),
            put(update_recipe),
        )
        .route(
            &format!("{root_path}/api/recipes/{{recipe_id}}"),
            delete(delete_recipe),
        )
}
