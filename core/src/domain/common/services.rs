use crate::domain::common::LadleConfig;

/// Aggregate service over the injected ports. Domain service traits are
/// implemented for this struct in their respective `services` modules.
#[derive(Clone)]
pub struct Service<RC, SC, PF, MS, SS, L, HC> {
    pub(crate) config: LadleConfig,
    pub(crate) recipe_repository: RC,
    pub(crate) search_cache_repository: SC,
    pub(crate) preference_repository: PF,
    pub(crate) mealdb_source: Option<MS>,
    pub(crate) spoonacular_source: Option<SS>,
    pub(crate) llm_client: Option<L>,
    pub(crate) health_check_repository: HC,
}

impl<RC, SC, PF, MS, SS, L, HC> Service<RC, SC, PF, MS, SS, L, HC> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: LadleConfig,
        recipe_repository: RC,
        search_cache_repository: SC,
        preference_repository: PF,
        mealdb_source: Option<MS>,
        spoonacular_source: Option<SS>,
        llm_client: Option<L>,
        health_check_repository: HC,
    ) -> Self {
        Self {
            config,
            recipe_repository,
            search_cache_repository,
            preference_repository,
            mealdb_source,
            spoonacular_source,
            llm_client,
            health_check_repository,
        }
    }
}
