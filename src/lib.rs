//! Lending Desk
//!
//! An in-memory library lending server: user accounts in three categories,
//! a single library-wide session, and a catalog of books, DVDs and magazines
//! with per-category loan durations and overdue detection, served as a REST
//! JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
