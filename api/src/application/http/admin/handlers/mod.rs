pub mod backfill_nutrition;
pub mod get_stats;
pub mod run_dedup;
pub mod seed_recipes;
