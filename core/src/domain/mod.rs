pub mod common;
pub mod health;
pub mod maintenance;
pub mod nutrition;
pub mod preference;
pub mod recipe;
