use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Equal-length compare over every byte, so timing does not depend on
/// where the first mismatch sits.
fn token_matches(provided: &str, expected: &str) -> bool {
    let (provided, expected) = (provided.as_bytes(), expected.as_bytes());
    if provided.len() != expected.len() {
        return false;
    }

    provided
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Guards the admin surface with the shared token from configuration.
/// With no token configured the endpoints are disabled outright.
pub struct AdminGuard;

impl<S> FromRequestParts<S> for AdminGuard
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let Some(expected) = app_state.args.server.admin_token.as_deref() else {
            return Err(ApiError::ServiceUnavailable(
                "admin endpoints are disabled: no admin token configured".to_string(),
            ));
        };

        let provided = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok());

        match provided {
            Some(token) if token_matches(token, expected) => Ok(AdminGuard),
            _ => Err(ApiError::Unauthorized("invalid admin token".to_string())),
        }
    }
}
