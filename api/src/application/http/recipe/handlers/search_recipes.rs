use axum::extract::{Query, State};
use ladle_core::domain::recipe::entities::Recipe;
use ladle_core::domain::recipe::ports::RecipeService;
use ladle_core::domain::recipe::value_objects::SearchRecipesInput;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::recipe::validators::{
    DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, SearchRecipesQuery,
};
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchRecipesResponse {
    pub data: Vec<Recipe>,
}

#[utoipa::path(
    get,
    path = "",
    tag = "recipe",
    summary = "Search recipes",
    description = "Searches the local cache first, then the configured upstream providers.",
    params(SearchRecipesQuery),
    responses(
        (status = 200, body = SearchRecipesResponse)
    )
)]
pub async fn search_recipes(
    Query(params): Query<SearchRecipesQuery>,
    State(state): State<AppState>,
) -> Result<Response<SearchRecipesResponse>, ApiError> {
    let input = SearchRecipesInput {
        query: params.query.unwrap_or_default(),
        cuisine: params.cuisine,
        diet: params.diet,
        limit: params
            .limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT),
    };

    let data = state
        .service
        .search_recipes(input)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SearchRecipesResponse { data }))
}
