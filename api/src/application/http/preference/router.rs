use super::handlers::get_preferences::{__path_get_preferences, get_preferences};
use super::handlers::put_preferences::{__path_put_preferences, put_preferences};
use crate::application::http::server::app_state::AppState;

use axum::{
    Router,
    routing::{get, put},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_preferences, put_preferences))]
pub struct PreferenceApiDoc;

pub fn preference_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{root_path}/api/preferences/{{profile_id}}"),
            get(get_preferences),
        )
        .route(
            &format!("{root_path}/api/preferences/{{profile_id}}"),
            put(put_preferences),
        )
}
