//! Configuration management for the arena booking service

use chrono::NaiveDate;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SeasonConfig {
    /// Year of the September that opens the season. When unset, the season
    /// containing today is used.
    pub start_year: Option<i32>,
    /// Fixed date used as "today" instead of the system clock
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BookingConfig {
    /// Address the reservation e-mail is addressed to
    pub destination_email: String,
    pub subject: String,
    /// Reserved hours after which a day counts as fully reserved (hours 7 to 24)
    pub daily_capacity: usize,
    pub promotion_name: String,
    pub promotion_description: String,
    pub promotion_start: NaiveDate,
    pub promotion_end: NaiveDate,
    /// Minutes without a request after which a booking session is dropped
    pub session_idle_minutes: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file backing the local key/value store
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub season: SeasonConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (ARENA_BOOKING__DESTINATION_EMAIL, ...)
            .add_source(
                Environment::with_prefix("ARENA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override store location from STORAGE_PATH env var if present
            .set_override_option("storage.path", env::var("STORAGE_PATH").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            destination_email: "reservation@arenalareau.com".to_string(),
            subject: "Demande de réservation de glace - Aréna Régional Lareau".to_string(),
            daily_capacity: 17,
            promotion_name: "Bourses de la Relève Sportive Desjardins".to_string(),
            promotion_description: "Programme de bourses pour jeunes athlètes".to_string(),
            promotion_start: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap_or_default(),
            promotion_end: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap_or_default(),
            session_idle_minutes: 120,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/local-store.json"),
        }
    }
}
