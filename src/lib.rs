//! Karibu Visitor Check-in Management System
//!
//! A Rust implementation of the Karibu reception server, providing a REST
//! JSON API for the public check-in kiosk and the admin dashboard, with a
//! WebSocket channel for live check-in notifications.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod phone;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
