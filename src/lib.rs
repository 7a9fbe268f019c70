pub mod admin;
pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod icons;
pub mod middleware;
pub mod models;
pub mod site;
pub mod types;
pub mod views;

pub use app::{app, AppState};
