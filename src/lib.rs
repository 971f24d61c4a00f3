//! Book API
//!
//! A small REST JSON server over an in-memory book catalog: list, fetch,
//! create and check out books.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state with a freshly seeded store
    pub fn new() -> Self {
        let repository = repository::Repository::new();
        Self {
            services: Arc::new(services::Services::new(repository)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
