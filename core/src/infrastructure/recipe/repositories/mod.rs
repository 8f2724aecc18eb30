pub mod recipe_repository;
pub mod search_cache_repository;
