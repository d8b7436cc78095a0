//! Per-page-view booking session: selected dates, their periods and an
//! optional custom time window

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{SelectedDateView, SessionView},
        enums::{AvailabilityStatus, IceType, Lang, PeriodId},
        period::{TimePeriod, TimeWindow},
    },
};

use super::pricing::total_price_for;

pub const MSG_FULLY_RESERVED: &str = "Cette date est complètement réservée.";
pub const MSG_PAST_DATE: &str = "Impossible de réserver une date passée.";
pub const MSG_OUT_OF_SEASON: &str = "Cette date est hors de la saison de réservation.";
pub const MSG_END_BEFORE_START: &str = "L'heure de fin doit être après l'heure de début.";
pub const MSG_MIN_DURATION: &str = "La durée minimale est de 30 minutes.";
pub const MSG_MAX_DURATION: &str = "La durée maximale est de 4 heures.";
pub const MSG_WINDOW_OUTSIDE_PERIOD: &str =
    "La plage horaire doit être comprise dans une période offerte.";
pub const MSG_DATE_NOT_SELECTED: &str = "Veuillez d'abord sélectionner cette date.";

const MIN_WINDOW_MINUTES: i64 = 30;
const MAX_WINDOW_MINUTES: i64 = 4 * 60;

/// What is picked on one date
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSelection {
    pub periods: BTreeSet<PeriodId>,
    pub window: Option<TimeWindow>,
}

impl DateSelection {
    /// Selected, but nothing to price or submit yet
    pub fn is_pending(&self) -> bool {
        self.periods.is_empty() && self.window.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct BookingSession {
    pub id: Uuid,
    pub ice_type: IceType,
    pub lang: Lang,
    pub created_at: DateTime<Utc>,
    selections: BTreeMap<NaiveDate, DateSelection>,
}

impl BookingSession {
    pub fn new(ice_type: IceType, lang: Lang) -> Self {
        Self {
            id: Uuid::new_v4(),
            ice_type,
            lang,
            created_at: Utc::now(),
            selections: BTreeMap::new(),
        }
    }

    pub fn selections(&self) -> &BTreeMap<NaiveDate, DateSelection> {
        &self.selections
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selections.contains_key(&date)
    }

    /// Whether at least one date carries a period or a window
    pub fn has_bookable_selection(&self) -> bool {
        self.selections.values().any(|s| !s.is_pending())
    }

    /// Select an unselected date or drop a selected one with its periods and
    /// window. `status` is the date's displayed classification and
    /// `fully_reserved` its saturation in the reservation store, checked even
    /// when a promotion or an event outranks it on display. Refused dates
    /// leave the session untouched. Returns whether the date is now selected.
    pub fn toggle_date(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
        status: AvailabilityStatus,
        fully_reserved: bool,
    ) -> AppResult<bool> {
        if fully_reserved || status == AvailabilityStatus::FullyReserved {
            tracing::debug!("Session {}: {} is fully reserved", self.id, date);
            return Err(AppError::FullyReserved(MSG_FULLY_RESERVED.to_string()));
        }
        if status == AvailabilityStatus::Unavailable {
            return Err(AppError::Validation(MSG_OUT_OF_SEASON.to_string()));
        }
        if date < today {
            return Err(AppError::BusinessRule(MSG_PAST_DATE.to_string()));
        }

        let selected = if self.selections.remove(&date).is_some() {
            false
        } else {
            self.selections.insert(date, DateSelection::default());
            true
        };
        tracing::debug!("Session {}: {} selected={}", self.id, date, selected);
        Ok(selected)
    }

    /// Add or remove `period` on a selected date. Does nothing when the date
    /// is not selected. Returns whether the period is now selected.
    pub fn toggle_period(
        &mut self,
        date: NaiveDate,
        period: PeriodId,
        offered: &[TimePeriod],
    ) -> AppResult<bool> {
        let Some(selection) = self.selections.get_mut(&date) else {
            tracing::debug!("Session {}: period toggle on unselected {}", self.id, date);
            return Ok(false);
        };
        if !offered.iter().any(|p| p.id == period) {
            return Err(AppError::Validation(format!(
                "La période « {} » n'est pas offerte le {}",
                period.label(self.lang),
                date
            )));
        }

        if selection.periods.remove(&period) {
            Ok(false)
        } else {
            selection.periods.insert(period);
            Ok(true)
        }
    }

    /// Set or clear the custom time window of a selected date. The window
    /// must end after it starts, last 30 minutes to 4 hours and fit inside
    /// one of the offered periods.
    pub fn set_window(
        &mut self,
        date: NaiveDate,
        window: Option<TimeWindow>,
        offered: &[TimePeriod],
    ) -> AppResult<()> {
        let Some(selection) = self.selections.get_mut(&date) else {
            return Err(AppError::BusinessRule(MSG_DATE_NOT_SELECTED.to_string()));
        };

        if let Some(window) = &window {
            let minutes = window.duration_minutes();
            if minutes <= 0 {
                return Err(AppError::Validation(MSG_END_BEFORE_START.to_string()));
            }
            if minutes < MIN_WINDOW_MINUTES {
                return Err(AppError::Validation(MSG_MIN_DURATION.to_string()));
            }
            if minutes > MAX_WINDOW_MINUTES {
                return Err(AppError::Validation(MSG_MAX_DURATION.to_string()));
            }
            if !offered.iter().any(|p| p.contains(window)) {
                return Err(AppError::Validation(MSG_WINDOW_OUTSIDE_PERIOD.to_string()));
            }
        }

        selection.window = window;
        Ok(())
    }

    pub fn clear_all(&mut self) {
        self.selections.clear();
    }

    pub fn set_ice_type(&mut self, ice_type: IceType) {
        self.ice_type = ice_type;
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            ice_type: self.ice_type,
            dates: self
                .selections
                .iter()
                .map(|(date, s)| SelectedDateView {
                    date: *date,
                    periods: s.periods.iter().copied().collect(),
                    window: s.window,
                    pending: s.is_pending(),
                })
                .collect(),
            quote: total_price_for(self),
        }
    }
}
