pub mod database;
pub mod fixtures;
