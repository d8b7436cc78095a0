//! Bookable periods of a day

use chrono::{NaiveDate, NaiveTime};

use crate::models::{
    calendar::is_weekend,
    enums::{Lang, PeriodId},
    period::TimePeriod,
};

/// Granularity of the start-time slots offered inside a period
pub const SLOT_STEP_MINUTES: u32 = 30;

fn hm(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn period(id: PeriodId, start: u32, end: u32, duration_hours: u32, off_peak: bool, lang: Lang) -> TimePeriod {
    TimePeriod {
        id,
        label: id.label(lang).to_string(),
        start: hm(start),
        end: hm(end),
        duration_hours,
        is_off_peak: off_peak,
    }
}

/// Periods offered on `date`: weekday mornings (07:00-09:00) and evenings
/// (16:00-00:00) at off-peak rates, one full day (07:00-00:00) on weekends.
pub fn periods_for(date: NaiveDate, lang: Lang) -> Vec<TimePeriod> {
    if is_weekend(date) {
        vec![period(PeriodId::Allday, 7, 0, 17, false, lang)]
    } else {
        vec![
            period(PeriodId::Morning, 7, 9, 2, true, lang),
            period(PeriodId::Evening, 16, 0, 8, true, lang),
        ]
    }
}

pub fn period_for(date: NaiveDate, id: PeriodId, lang: Lang) -> Option<TimePeriod> {
    periods_for(date, lang).into_iter().find(|p| p.id == id)
}
