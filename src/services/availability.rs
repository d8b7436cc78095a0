//! Availability classification, season grids and the events panel

use chrono::NaiveDate;

use crate::{
    config::{BookingConfig, SeasonConfig},
    error::{AppError, AppResult},
    models::{
        booking::{DayDetail, PeriodOffer},
        calendar::{days_in_month, weekday_from_sunday, CalendarDay, MonthGrid, Season},
        enums::{AvailabilityStatus, EventCategory, EventStatus, IceType, Lang},
        event::{
            EventListing, OngoingPromotion, SPECIAL_EVENTS, TBD_TOURNAMENT_DESCRIPTION,
            TBD_TOURNAMENT_NAME,
        },
        reservation::ReservationRecord,
    },
    repository::Repository,
};

use super::{
    periods::{periods_for, SLOT_STEP_MINUTES},
    pricing::price_for,
    selection::BookingSession,
};

pub const DEFAULT_UPCOMING_LIMIT: usize = 8;

#[derive(Clone)]
pub struct AvailabilityService {
    repository: Repository,
    season: SeasonConfig,
    promotion: OngoingPromotion,
    daily_capacity: usize,
}

impl AvailabilityService {
    pub fn new(repository: Repository, season: SeasonConfig, booking: &BookingConfig) -> Self {
        Self {
            repository,
            season,
            promotion: OngoingPromotion {
                name: booking.promotion_name.clone(),
                description: booking.promotion_description.clone(),
                start_date: booking.promotion_start,
                end_date: booking.promotion_end,
            },
            daily_capacity: booking.daily_capacity,
        }
    }

    /// Configured season, or the one containing `today`
    pub fn season(&self, today: NaiveDate) -> Season {
        match self.season.start_year {
            Some(start_year) => Season { start_year },
            None => Season::containing(today),
        }
    }

    pub fn promotion(&self) -> &OngoingPromotion {
        &self.promotion
    }

    /// Current snapshot of the reserved hours
    pub async fn reservations(&self) -> ReservationRecord {
        self.repository.reservations.load().await
    }

    /// Status of `date`; the first matching rule wins: ongoing promotion,
    /// special event, saturated reservations, weekday/weekend.
    pub fn classify(
        &self,
        date: NaiveDate,
        today: NaiveDate,
        record: &ReservationRecord,
    ) -> AvailabilityStatus {
        if !self.season(today).contains(date) {
            return AvailabilityStatus::Unavailable;
        }
        if self.promotion.contains(date) {
            return AvailabilityStatus::Ongoing;
        }
        if SPECIAL_EVENTS.contains_key(&date) {
            return if date >= today {
                AvailabilityStatus::Upcoming
            } else {
                AvailabilityStatus::Completed
            };
        }
        if self.is_fully_reserved(date, record) {
            return AvailabilityStatus::FullyReserved;
        }
        match weekday_from_sunday(date) {
            1..=5 => AvailabilityStatus::WeekdayAvailable,
            _ => AvailabilityStatus::WeekendUnavailable,
        }
    }

    /// Whether every bookable hour of `date` is taken, regardless of how the
    /// date is displayed
    pub fn is_fully_reserved(&self, date: NaiveDate, record: &ReservationRecord) -> bool {
        record.is_fully_reserved(date, self.daily_capacity)
    }

    pub fn calendar_day(
        &self,
        date: NaiveDate,
        today: NaiveDate,
        record: &ReservationRecord,
    ) -> CalendarDay {
        let status = self.classify(date, today, record);
        let mut day = CalendarDay::new(date, today, status);
        day.event_name = match status {
            AvailabilityStatus::Ongoing => Some(self.promotion.name.clone()),
            AvailabilityStatus::Upcoming | AvailabilityStatus::Completed => {
                SPECIAL_EVENTS.get(&date).map(|e| e.name.clone())
            }
            _ => None,
        };
        day
    }

    fn build_month(
        &self,
        year: i32,
        month: u32,
        today: NaiveDate,
        lang: Lang,
        record: &ReservationRecord,
        session: Option<&BookingSession>,
    ) -> MonthGrid {
        let days: Vec<CalendarDay> = (1..=days_in_month(year, month))
            .filter_map(|d| NaiveDate::from_ymd_opt(year, month, d))
            .map(|date| {
                let mut day = self.calendar_day(date, today, record);
                day.selected = session.is_some_and(|s| s.is_selected(date));
                day
            })
            .collect();

        let month_name = lang.month_name(month);
        let mut title: String = month_name
            .chars()
            .take(1)
            .flat_map(char::to_uppercase)
            .collect();
        title.push_str(&month_name.chars().skip(1).collect::<String>());

        MonthGrid {
            year,
            month,
            title: format!("{} {}", title, year),
            weekday_labels: lang.weekday_initials().iter().map(|s| s.to_string()).collect(),
            leading_blanks: days.first().map(|d| d.day_of_week).unwrap_or(0),
            days,
        }
    }

    /// One month of the season
    pub async fn month_grid(
        &self,
        year: i32,
        month: u32,
        today: NaiveDate,
        lang: Lang,
        session: Option<&BookingSession>,
    ) -> AppResult<MonthGrid> {
        let season = self.season(today);
        if !season.months().contains(&(year, month)) {
            return Err(AppError::NotFound(format!(
                "{}-{:02} is outside the {}-{} season",
                year,
                month,
                season.start_year,
                season.start_year + 1
            )));
        }
        let record = self.reservations().await;
        Ok(self.build_month(year, month, today, lang, &record, session))
    }

    /// The twelve months of the season, September first
    pub async fn season_grid(
        &self,
        today: NaiveDate,
        lang: Lang,
        session: Option<&BookingSession>,
    ) -> Vec<MonthGrid> {
        let record = self.reservations().await;
        self.season(today)
            .months()
            .into_iter()
            .map(|(year, month)| self.build_month(year, month, today, lang, &record, session))
            .collect()
    }

    /// Status, reserved hours, periods, slots and prices of one day
    pub async fn day_detail(&self, date: NaiveDate, today: NaiveDate, lang: Lang) -> DayDetail {
        let record = self.reservations().await;
        let day = self.calendar_day(date, today, &record);

        let periods = periods_for(date, lang)
            .into_iter()
            .map(|period| {
                let minutes = period.duration_minutes();
                PeriodOffer {
                    slots: period.slots(SLOT_STEP_MINUTES),
                    full_ice: price_for(&period, minutes, IceType::Full),
                    half_ice: price_for(&period, minutes, IceType::Left),
                    period,
                }
            })
            .collect();

        DayDetail {
            day,
            reserved_hours: record.reserved_hours(date).into_iter().collect(),
            periods,
        }
    }

    /// Events panel: the promotion when running, the next dated events
    /// (at most `limit`), then tournaments without a date yet
    pub fn upcoming_events(&self, today: NaiveDate, limit: usize) -> Vec<EventListing> {
        let mut listings = Vec::new();

        if self.promotion.contains(today) {
            listings.push(EventListing {
                date: Some(self.promotion.start_date),
                name: self.promotion.name.clone(),
                description: self.promotion.description.clone(),
                category: EventCategory::Scholarship,
                status: EventStatus::Ongoing,
                time: None,
                color: EventCategory::Scholarship.color().to_string(),
            });
        }

        listings.extend(SPECIAL_EVENTS.range(today..).take(limit).map(|(date, event)| {
            EventListing {
                date: Some(*date),
                name: event.name.clone(),
                description: event.description.clone(),
                category: event.category,
                status: EventStatus::Upcoming,
                time: event.time.clone(),
                color: event.category.color().to_string(),
            }
        }));

        listings.push(EventListing {
            date: None,
            name: TBD_TOURNAMENT_NAME.to_string(),
            description: TBD_TOURNAMENT_DESCRIPTION.to_string(),
            category: EventCategory::Sports,
            status: EventStatus::Tbd,
            time: None,
            color: EventCategory::Sports.color().to_string(),
        });

        listings
    }

    /// Dated events of the season that already took place
    pub fn completed_events(&self, today: NaiveDate) -> Vec<EventListing> {
        let first_day = self.season(today).first_day();
        if today <= first_day {
            return Vec::new();
        }
        SPECIAL_EVENTS
            .range(first_day..today)
            .map(|(date, event)| EventListing {
                date: Some(*date),
                name: event.name.clone(),
                description: event.description.clone(),
                category: event.category,
                status: EventStatus::Completed,
                time: event.time.clone(),
                color: event.category.color().to_string(),
            })
            .collect()
    }
}
