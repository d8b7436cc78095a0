//! Arena booking service
//!
//! Ice-rental availability calendar for Aréna Régional Lareau: season grids,
//! time periods, booking sessions with pricing, and the pre-filled
//! reservation e-mail, served as a REST JSON API.

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
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Open the local store named in `config` and build the services over it
    pub async fn new(config: AppConfig) -> AppResult<Self> {
        let store = repository::LocalStore::open(&config.storage.path).await?;
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: AppConfig, store: repository::LocalStore) -> Self {
        let services = services::Services::new(repository::Repository::new(store), &config);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
