pub mod entities;
pub mod ports;
pub mod schema;
pub mod services;
