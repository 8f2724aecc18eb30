pub mod health;
pub mod llm;
pub mod preference;
pub mod recipe;
pub mod sources;
pub mod store;
