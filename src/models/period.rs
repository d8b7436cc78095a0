//! Bookable time periods and free-form time windows

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::PeriodId;

/// Minutes since midnight, with an end of 00:00 read as 24:00
fn minutes_of(time: NaiveTime, as_end: bool) -> u32 {
    let minutes = time.hour() * 60 + time.minute();
    if as_end && minutes == 0 {
        24 * 60
    } else {
        minutes
    }
}

/// Format minutes since midnight as HH:MM, 24:00 wrapping to 00:00
pub fn format_minutes(minutes: u32) -> String {
    let minutes = minutes % (24 * 60);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// A bookable period of a day
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TimePeriod {
    pub id: PeriodId,
    pub label: String,
    #[schema(value_type = String, example = "16:00")]
    #[serde(serialize_with = "hhmm::serialize")]
    pub start: NaiveTime,
    /// 00:00 means midnight at the end of the day
    #[schema(value_type = String, example = "00:00")]
    #[serde(serialize_with = "hhmm::serialize")]
    pub end: NaiveTime,
    pub duration_hours: u32,
    /// Off-peak periods receive the 10% rebate
    pub is_off_peak: bool,
}

impl TimePeriod {
    pub fn start_minutes(&self) -> u32 {
        minutes_of(self.start, false)
    }

    pub fn end_minutes(&self) -> u32 {
        minutes_of(self.end, true)
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_hours * 60
    }

    /// Whether `window` lies entirely inside this period
    pub fn contains(&self, window: &TimeWindow) -> bool {
        self.start_minutes() <= window.start_minutes() && window.end_minutes() <= self.end_minutes()
    }

    /// Slot start times from `start`, stepping `step_minutes`, stopping before `end`
    pub fn slots(&self, step_minutes: u32) -> Vec<String> {
        let step = step_minutes.max(1);
        (self.start_minutes()..self.end_minutes())
            .step_by(step as usize)
            .map(format_minutes)
            .collect()
    }
}

/// A free-form start/end window typed by the visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeWindow {
    #[schema(value_type = String, example = "09:00")]
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// 00:00 means midnight at the end of the day
    #[schema(value_type = String, example = "10:30")]
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn start_minutes(&self) -> u32 {
        minutes_of(self.start, false)
    }

    pub fn end_minutes(&self) -> u32 {
        minutes_of(self.end, true)
    }

    /// Signed length in minutes; zero or negative when end is not after start
    pub fn duration_minutes(&self) -> i64 {
        self.end_minutes() as i64 - self.start_minutes() as i64
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            format_minutes(self.start_minutes()),
            format_minutes(self.end_minutes())
        )
    }
}

/// `HH:MM` serde helpers for `NaiveTime`
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parse `HH:MM`, accepting `24:00` as midnight
    pub fn parse(raw: &str) -> Result<NaiveTime, String> {
        let raw = raw.trim();
        if raw == "24:00" {
            return Ok(NaiveTime::MIN);
        }
        NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| format!("Heure invalide: {}", raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn evening() -> TimePeriod {
        TimePeriod {
            id: PeriodId::Evening,
            label: "Soir".to_string(),
            start: t(16, 0),
            end: t(0, 0),
            duration_hours: 8,
            is_off_peak: true,
        }
    }

    #[test]
    fn test_midnight_end_rolls_over() {
        let period = evening();
        assert_eq!(period.end_minutes(), 1440);
        assert_eq!(period.end_minutes() - period.start_minutes(), period.duration_minutes());
    }

    #[test]
    fn test_slots_step_half_hours() {
        let slots = evening().slots(30);
        assert_eq!(slots.len(), 16);
        assert_eq!(slots.first().unwrap(), "16:00");
        assert_eq!(slots.last().unwrap(), "23:30");
    }

    #[test]
    fn test_window_containment() {
        let period = evening();
        let inside = TimeWindow { start: t(22, 0), end: t(0, 0) };
        let outside = TimeWindow { start: t(15, 30), end: t(17, 0) };
        assert!(period.contains(&inside));
        assert!(!period.contains(&outside));
        assert_eq!(inside.duration_minutes(), 120);
        assert_eq!(inside.to_string(), "22:00 - 00:00");
    }

    #[test]
    fn test_parse_accepts_midnight_forms() {
        assert_eq!(hhmm::parse("24:00").unwrap(), t(0, 0));
        assert_eq!(hhmm::parse("07:30").unwrap(), t(7, 30));
        assert!(hhmm::parse("7h30").is_err());
    }
}
