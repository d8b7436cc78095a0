//! Reserved hours kept under `reservedDates` and `fullReservations`

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::reservation::{ReservationRecord, FIRST_HOUR, LAST_HOUR},
};

use super::store::LocalStore;

pub const RESERVED_DATES_KEY: &str = "reservedDates";
pub const FULL_RESERVATIONS_KEY: &str = "fullReservations";

#[derive(Clone)]
pub struct ReservationsRepository {
    store: LocalStore,
}

impl ReservationsRepository {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    async fn read_key(&self, key: &str) -> ReservationRecord {
        let Some(raw) = self.store.get_item(key).await else {
            return ReservationRecord::default();
        };
        match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Ignoring unreadable {}: {}", key, e);
                ReservationRecord::default()
            }
        }
    }

    /// Snapshot of both keys merged into one record
    pub async fn load(&self) -> ReservationRecord {
        let reserved = self.read_key(RESERVED_DATES_KEY).await;
        let full = self.read_key(FULL_RESERVATIONS_KEY).await;
        reserved.merge(full)
    }

    /// Mark hours `start_hour..end_hour` reserved on each date
    pub async fn record(
        &self,
        dates: &[NaiveDate],
        start_hour: u32,
        end_hour: u32,
    ) -> AppResult<ReservationRecord> {
        if dates.is_empty() {
            return Err(AppError::Validation("Aucune date fournie".to_string()));
        }
        if start_hour < FIRST_HOUR || end_hour > LAST_HOUR || start_hour >= end_hour {
            return Err(AppError::Validation(format!(
                "Plage horaire invalide: {}h-{}h (heures permises {}h à {}h)",
                start_hour, end_hour, FIRST_HOUR, LAST_HOUR
            )));
        }

        let mut record = self.read_key(RESERVED_DATES_KEY).await;
        record.record_hours(dates, start_hour, end_hour);
        self.store
            .set_item(RESERVED_DATES_KEY, serde_json::to_string(&record)?)
            .await?;

        tracing::info!(
            "Recorded {}h-{}h on {} date(s)",
            start_hour,
            end_hour,
            dates.len()
        );

        Ok(self.load().await)
    }
}
