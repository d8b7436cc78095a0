//! Reserved hours recorded in the local store

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use utoipa::ToSchema;

use super::period::hhmm;

/// First and last (exclusive) bookable hours of a day; 24 is midnight
pub const FIRST_HOUR: u32 = 7;
pub const LAST_HOUR: u32 = 24;

/// One stored entry: a bare hour or a `{start, end}` window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReservedSlot {
    Hour(u32),
    Window { start: String, end: String },
}

impl ReservedSlot {
    /// Whole hours covered by this entry, limited to the bookable range.
    /// Windows with unreadable times cover nothing.
    pub fn hours(&self) -> Vec<u32> {
        match self {
            ReservedSlot::Hour(h) => {
                if (FIRST_HOUR..LAST_HOUR).contains(h) {
                    vec![*h]
                } else {
                    Vec::new()
                }
            }
            ReservedSlot::Window { start, end } => {
                let (Ok(start), Ok(end)) = (hhmm::parse(start), hhmm::parse(end)) else {
                    return Vec::new();
                };
                let window = super::period::TimeWindow { start, end };
                let first = window.start_minutes() / 60;
                let last = window.end_minutes().div_ceil(60);
                (first.max(FIRST_HOUR)..last.min(LAST_HOUR)).collect()
            }
        }
    }
}

/// Date → reserved entries, as kept under `reservedDates` / `fullReservations`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationRecord(pub BTreeMap<NaiveDate, Vec<ReservedSlot>>);

impl ReservationRecord {
    /// Distinct reserved hours of a date
    pub fn reserved_hours(&self, date: NaiveDate) -> BTreeSet<u32> {
        self.0
            .get(&date)
            .map(|slots| slots.iter().flat_map(ReservedSlot::hours).collect())
            .unwrap_or_default()
    }

    pub fn is_fully_reserved(&self, date: NaiveDate, capacity: usize) -> bool {
        self.reserved_hours(date).len() >= capacity
    }

    /// Append hours `start..end` to each date, skipping hours already present
    pub fn record_hours(&mut self, dates: &[NaiveDate], start: u32, end: u32) {
        for date in dates {
            let slots = self.0.entry(*date).or_default();
            for hour in start..end {
                let slot = ReservedSlot::Hour(hour);
                if !slots.contains(&slot) {
                    slots.push(slot);
                }
            }
        }
    }

    /// Union of two records
    pub fn merge(mut self, other: ReservationRecord) -> Self {
        for (date, slots) in other.0 {
            let entry = self.0.entry(date).or_default();
            for slot in slots {
                if !entry.contains(&slot) {
                    entry.push(slot);
                }
            }
        }
        self
    }
}

/// Record request: the same start/end hours on every listed date
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordReservation {
    pub dates: Vec<NaiveDate>,
    /// First reserved hour (7..=23)
    pub start_hour: u32,
    /// End hour, exclusive (8..=24, 24 = midnight)
    pub end_hour: u32,
}

/// Reserved hours per date
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservedDay {
    pub date: NaiveDate,
    pub hours: Vec<u32>,
    pub fully_reserved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_json_round_trip_is_order_independent() {
        let raw = r#"{
            "2025-10-06": [7, 8, {"start": "16:00", "end": "18:00"}],
            "2025-10-07": [{"start": "20:00", "end": "00:00"}, 9]
        }"#;
        let record: ReservationRecord = serde_json::from_str(raw).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: ReservationRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record.0.keys().collect::<Vec<_>>(), parsed.0.keys().collect::<Vec<_>>());
        for (day, slots) in &record.0 {
            let expected: BTreeSet<String> = slots.iter().map(|s| format!("{:?}", s)).collect();
            let actual: BTreeSet<String> = parsed.0[day].iter().map(|s| format!("{:?}", s)).collect();
            assert_eq!(expected, actual);
        }
    }

    #[test]
    fn test_window_hours_count_toward_capacity() {
        let mut record = ReservationRecord::default();
        let day = date(2025, 10, 6);
        record.0.insert(
            day,
            vec![ReservedSlot::Window {
                start: "07:00".to_string(),
                end: "00:00".to_string(),
            }],
        );
        assert_eq!(record.reserved_hours(day).len(), 17);
        assert!(record.is_fully_reserved(day, 17));
    }

    #[test]
    fn test_record_hours_skips_duplicates() {
        let mut record = ReservationRecord::default();
        let day = date(2025, 10, 6);
        record.record_hours(&[day], 7, 10);
        record.record_hours(&[day], 9, 12);
        assert_eq!(record.0[&day].len(), 5);
        assert_eq!(record.reserved_hours(day), (7..12).collect::<BTreeSet<u32>>());
    }

    #[test]
    fn test_out_of_range_hours_are_ignored() {
        assert!(ReservedSlot::Hour(3).hours().is_empty());
        assert_eq!(ReservedSlot::Hour(23).hours(), vec![23]);
    }
}
