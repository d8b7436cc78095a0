//! Business logic services

pub mod availability;
pub mod email;
pub mod periods;
pub mod pricing;
pub mod selection;
pub mod sessions;

use std::time::Duration;

use chrono::{Local, NaiveDate};

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub availability: availability::AvailabilityService,
    pub email: email::EmailService,
    pub sessions: sessions::SessionService,
    fixed_today: Option<NaiveDate>,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        Self {
            availability: availability::AvailabilityService::new(
                repository.clone(),
                config.season.clone(),
                &config.booking,
            ),
            email: email::EmailService::new(config.booking.clone(), repository.clone()),
            sessions: sessions::SessionService::new(Duration::from_secs(
                config.booking.session_idle_minutes * 60,
            )),
            fixed_today: config.season.today,
            repository,
        }
    }

    /// The configured fixed date, or the local calendar date
    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| Local::now().date_naive())
    }
}
