pub mod app_config;
pub mod blog;
pub mod db;
pub mod email;
pub mod middleware;
pub mod moderation;
pub mod notifications;
pub mod orm;
pub mod session;
pub mod user;
pub mod web;
