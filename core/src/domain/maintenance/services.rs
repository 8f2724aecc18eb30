use std::collections::BTreeMap;

use tracing::info;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
    maintenance::{
        entities::{CacheStats, DedupGroup, DedupReport},
        ports::MaintenanceService,
    },
    nutrition::ports::LlmClient,
    preference::ports::PreferenceRepository,
    recipe::{
        entities::Recipe,
        helpers::normalize_title,
        ports::{RecipeCacheRepository, RecipeSourcePort, SearchCacheRepository},
    },
};

const INGREDIENT_SCORE_CAP: usize = 10;

/// Scores how complete a record is. Higher wins a dedup group.
pub(crate) fn completeness_score(recipe: &Recipe) -> u32 {
    let mut score = 1;
    if !recipe.description.is_empty() {
        score += 2;
    }
    score += 2 * recipe.ingredients.len().min(INGREDIENT_SCORE_CAP) as u32;
    if !recipe.instructions.is_empty() {
        score += 5;
    }
    if recipe.nutrition.is_some() {
        score += 5;
    }
    if recipe.image_url.is_some() {
        score += 2;
    }
    if !recipe.cuisines.is_empty() {
        score += 1;
    }
    if !recipe.diets.is_empty() {
        score += 1;
    }
    if !recipe.tags.is_empty() {
        score += 1;
    }
    score
}

/// Picks the keeper of a duplicate group: highest completeness score,
/// then newest `updated_at`, then id as the final deterministic key.
pub(crate) fn select_keeper(group: &[Recipe]) -> &Recipe {
    group
        .iter()
        .max_by(|a, b| {
            completeness_score(a)
                .cmp(&completeness_score(b))
                .then(a.updated_at.cmp(&b.updated_at))
                .then(a.id.cmp(&b.id))
        })
        .unwrap_or(&group[0])
}

impl<RC, SC, PF, MS, SS, L, HC> MaintenanceService for Service<RC, SC, PF, MS, SS, L, HC>
where
    RC: RecipeCacheRepository,
    SC: SearchCacheRepository,
    PF: PreferenceRepository,
    MS: RecipeSourcePort,
    SS: RecipeSourcePort,
    L: LlmClient,
    HC: HealthCheckRepository,
{
    async fn dedup_recipes(&self, dry_run: bool) -> Result<DedupReport, CoreError> {
        let recipes = self.recipe_repository.get_all().await?;

        let mut groups: BTreeMap<String, Vec<Recipe>> = BTreeMap::new();
        for recipe in &recipes {
            groups
                .entry(normalize_title(&recipe.title))
                .or_default()
                .push(recipe.clone());
        }

        let mut report = DedupReport {
            scanned: recipes.len(),
            dry_run,
            ..Default::default()
        };
        let mut doomed = Vec::new();

        for (title_key, group) in groups {
            if group.len() < 2 {
                continue;
            }
            let keeper = select_keeper(&group);
            let deleted_ids: Vec<String> = group
                .iter()
                .filter(|r| r.id != keeper.id)
                .map(|r| r.id.clone())
                .collect();

            report.groups_with_duplicates += 1;
            report.kept += 1;
            report.deleted += deleted_ids.len();
            doomed.extend(deleted_ids.clone());
            report.groups.push(DedupGroup {
                title_key,
                kept_id: keeper.id.clone(),
                deleted_ids,
            });
        }

        if !dry_run && !doomed.is_empty() {
            self.recipe_repository.delete(&doomed).await?;
            info!("dedup removed {} duplicate recipes", doomed.len());
        }

        Ok(report)
    }

    async fn cache_stats(&self) -> Result<CacheStats, CoreError> {
        let recipes = self.recipe_repository.get_all().await?;

        let mut by_source: BTreeMap<String, usize> = BTreeMap::new();
        let mut cuisines: BTreeMap<String, ()> = BTreeMap::new();
        let mut with_nutrition = 0;

        for recipe in &recipes {
            *by_source
                .entry(recipe.source.id_prefix().to_string())
                .or_default() += 1;
            if recipe.nutrition.is_some() {
                with_nutrition += 1;
            }
            for cuisine in &recipe.cuisines {
                cuisines.insert(cuisine.to_lowercase(), ());
            }
        }

        Ok(CacheStats {
            total_recipes: recipes.len(),
            by_source,
            with_nutrition,
            without_nutrition: recipes.len() - with_nutrition,
            distinct_cuisines: cuisines.len(),
            search_cache_entries: self.search_cache_repository.count().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::entities::{Ingredient, NutritionFacts, RecipeDraft, RecipeSource};

    fn ingredient(name: &str) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            amount: None,
            unit: String::new(),
            original: name.to_string(),
        }
    }

    fn recipe(id: &str, title: &str) -> Recipe {
        Recipe::new(RecipeDraft {
            id: Some(id.to_string()),
            title: title.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_bare_record_scores_title_only() {
        assert_eq!(completeness_score(&recipe("user-1", "Plain")), 1);
    }

    #[test]
    fn test_ingredient_score_is_capped() {
        let mut r = recipe("user-1", "Loaded");
        r.ingredients = (0..25).map(|i| ingredient(&format!("item {i}"))).collect();
        let mut capped = recipe("user-2", "Loaded");
        capped.ingredients = (0..10).map(|i| ingredient(&format!("item {i}"))).collect();
        assert_eq!(completeness_score(&r), completeness_score(&capped));
    }

    #[test]
    fn test_chicken_curry_keeps_richest_copy() {
        // Sparse listing-only copy: a couple of ingredients, nothing else.
        let mut sparse = recipe("mealdb-100", "Chicken Curry");
        sparse.source = RecipeSource::MealDb;
        sparse.ingredients = vec![ingredient("chicken"), ingredient("curry paste")];

        // Full copy: description, instructions, nutrition, image.
        let mut rich = recipe("spoonacular-200", "Chicken  Curry!");
        rich.source = RecipeSource::Spoonacular;
        rich.description = "A weeknight chicken curry.".to_string();
        rich.ingredients = vec![
            ingredient("chicken thighs"),
            ingredient("curry paste"),
            ingredient("coconut milk"),
        ];
        rich.instructions = vec!["Brown the chicken.".into(), "Simmer in sauce.".into()];
        rich.nutrition = Some(NutritionFacts {
            calories: 520.0,
            protein_g: 38.0,
            carbs_g: 12.0,
            fat_g: 30.0,
        });
        rich.image_url = Some("https://img.example/curry.jpg".to_string());

        assert_eq!(
            normalize_title(&sparse.title),
            normalize_title(&rich.title)
        );
        let group = [sparse, rich.clone()];
        let keeper = select_keeper(&group);
        assert_eq!(keeper.id, rich.id);
    }

    #[test]
    fn test_tie_breaks_on_newer_updated_at() {
        let mut older = recipe("user-a", "Lentil Soup");
        older.updated_at = "2024-01-01T00:00:00Z".parse().unwrap();
        let mut newer = recipe("user-b", "Lentil Soup");
        newer.updated_at = "2024-06-01T00:00:00Z".parse().unwrap();

        let group = [older, newer.clone()];
        let keeper = select_keeper(&group);
        assert_eq!(keeper.id, newer.id);
    }
}
