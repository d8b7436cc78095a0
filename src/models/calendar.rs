//! Calendar models (season window, month grids, days)

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use super::enums::AvailabilityStatus;

/// A booking season: September 1st of `start_year` to August 31st of the
/// following year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Season {
    pub start_year: i32,
}

impl Season {
    /// Season containing `today`: the current year from September on,
    /// otherwise the previous one.
    pub fn containing(today: NaiveDate) -> Self {
        let start_year = if today.month() >= 9 {
            today.year()
        } else {
            today.year() - 1
        };
        Self { start_year }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year, 9, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year + 1, 8, 31).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_day() <= date && date <= self.last_day()
    }

    /// The twelve (year, month) pairs of the season, September first
    pub fn months(&self) -> Vec<(i32, u32)> {
        let first = self.first_day();
        (0..12)
            .filter_map(|offset| first.checked_add_months(Months::new(offset)))
            .map(|d| (d.year(), d.month()))
            .collect()
    }
}

/// Day of week counted from Sunday = 0
pub fn weekday_from_sunday(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(weekday_from_sunday(date), 0 | 6)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = first.and_then(|d| d.checked_add_months(Months::new(1)));
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

/// One day cell of a month grid
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    pub is_past: bool,
    pub is_weekend: bool,
    /// Visual tag independent of the availability status
    pub is_today: bool,
    pub status: AvailabilityStatus,
    /// Name of the promotion or event shown on the day, if any
    pub event_name: Option<String>,
    pub selected: bool,
}

impl CalendarDay {
    pub fn new(date: NaiveDate, today: NaiveDate, status: AvailabilityStatus) -> Self {
        Self {
            date,
            day_of_week: weekday_from_sunday(date),
            is_past: date < today,
            is_weekend: is_weekend(date),
            is_today: date == today,
            status,
            event_name: None,
            selected: false,
        }
    }
}

/// A rendered month: title, headers, leading blank cells and days
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// "Septembre 2025"
    pub title: String,
    /// Column headers, Sunday first
    pub weekday_labels: Vec<String>,
    /// Empty cells before the 1st (day of week of the 1st, Sunday = 0)
    pub leading_blanks: u8,
    pub days: Vec<CalendarDay>,
}
