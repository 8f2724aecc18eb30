use crate::application::http::{
    admin::router::AdminApiDoc, nutrition::router::NutritionApiDoc,
    preference::router::PreferenceApiDoc, recipe::router::RecipeApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ladle API"
    ),
    nest(
        (path = "/api/recipes", api = RecipeApiDoc),
        (path = "/api/recipes", api = NutritionApiDoc),
        (path = "/api/preferences", api = PreferenceApiDoc),
        (path = "/api/admin", api = AdminApiDoc),
    )
)]
pub struct ApiDoc;
