pub mod admin;
pub mod health;
pub mod nutrition;
pub mod preference;
pub mod recipe;
pub mod server;

#[cfg(test)]
pub mod test;
