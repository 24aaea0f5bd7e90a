pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod models;
pub mod stats;
pub mod web;

pub use config::EnvironmentConfig;
pub use web::start_web_server;
