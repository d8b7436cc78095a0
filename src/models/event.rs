//! Special events and the ongoing promotion (holidays, tournaments, family evenings)

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::enums::{EventCategory, EventKind, EventStatus};

/// A dated event of the season
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SpecialEvent {
    pub date: NaiveDate,
    pub name: String,
    pub description: String,
    pub category: EventCategory,
    pub kind: EventKind,
    /// Time of day for evening events ("18h-21h")
    pub time: Option<String>,
}

/// The single promotion interval; a day falls inside when `start <= day <= end`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OngoingPromotion {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl OngoingPromotion {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Event listing entry (upcoming events panel)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventListing {
    /// None for events whose date is not yet known
    pub date: Option<NaiveDate>,
    pub name: String,
    pub description: String,
    pub category: EventCategory,
    pub status: EventStatus,
    pub time: Option<String>,
    pub color: String,
}

/// Tournament announced without a date
pub const TBD_TOURNAMENT_NAME: &str = "Tournoi Régional";
pub const TBD_TOURNAMENT_DESCRIPTION: &str = "Date à déterminer - Plus d'informations bientôt";

fn event(
    date: (i32, u32, u32),
    name: &str,
    description: &str,
    category: EventCategory,
    kind: EventKind,
    time: Option<&str>,
) -> Option<SpecialEvent> {
    Some(SpecialEvent {
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)?,
        name: name.to_string(),
        description: description.to_string(),
        category,
        kind,
        time: time.map(str::to_string),
    })
}

/// Events of the 2025-2026 season keyed by date
pub static SPECIAL_EVENTS: Lazy<BTreeMap<NaiveDate, SpecialEvent>> = Lazy::new(|| {
    use EventCategory::*;
    use EventKind::*;

    [
        // Holidays
        event((2025, 11, 11), "Jour du Souvenir", "Journée nationale du Souvenir au Canada", National, EventKind::Holiday, None),
        event((2025, 12, 25), "Noël", "Fête de Noël - Aréna fermé", EventCategory::Holiday, EventKind::Holiday, None),
        event((2025, 12, 26), "Lendemain de Noël", "Fête du Boxing Day", EventCategory::Holiday, EventKind::Holiday, None),
        event((2026, 1, 1), "Jour de l'An", "Nouvel An - Aréna fermé", EventCategory::Holiday, EventKind::Holiday, None),
        event((2026, 4, 3), "Vendredi Saint", "Vendredi Saint - Horaire modifié", Religious, EventKind::Holiday, None),
        event((2026, 4, 6), "Lundi de Pâques", "Lundi de Pâques - Aréna fermé", Religious, EventKind::Holiday, None),
        event((2026, 5, 18), "Journée des Patriotes", "Journée nationale des patriotes", National, EventKind::Holiday, None),
        event((2026, 6, 24), "Saint-Jean-Baptiste", "Fête nationale du Québec", National, EventKind::Holiday, None),
        event((2026, 7, 1), "Fête du Canada", "Canada Day - Aréna fermé", National, EventKind::Holiday, None),
        // Tournaments
        event((2025, 11, 15), "Tournoi Novice", "Tournoi régional de hockey novice", Sports, Tournament, None),
        event((2025, 12, 7), "Tournoi Atome", "Compétition régionale atome", Sports, Tournament, None),
        event((2026, 1, 18), "Tournoi Pee-Wee", "Tournoi pee-wee régional", Sports, Tournament, None),
        event((2026, 2, 22), "Tournoi Bantam", "Compétition bantam régionale", Sports, Tournament, None),
        // Family events
        event((2025, 12, 14), "Soirée des Fêtes", "Patinage libre et activités familiales", Family, Event, Some("18h-21h")),
        event((2026, 2, 14), "Soirée Saint-Valentin", "Patinage en couple et ambiance romantique", Family, Event, Some("19h-22h")),
        event((2026, 3, 14), "Journée Familiale", "Activités pour toute la famille", Family, Event, Some("10h-16h")),
    ]
    .into_iter()
    .flatten()
    .map(|e| (e.date, e))
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_table_is_keyed_by_date() {
        let christmas = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let event = SPECIAL_EVENTS.get(&christmas).unwrap();
        assert_eq!(event.name, "Noël");
        assert_eq!(SPECIAL_EVENTS.len(), 16);
    }

    #[test]
    fn test_easter_holidays_fall_on_2026_dates() {
        let good_friday = NaiveDate::from_ymd_opt(2026, 4, 3).unwrap();
        let easter_monday = NaiveDate::from_ymd_opt(2026, 4, 6).unwrap();
        assert_eq!(SPECIAL_EVENTS[&good_friday].name, "Vendredi Saint");
        assert_eq!(SPECIAL_EVENTS[&easter_monday].name, "Lundi de Pâques");
        assert!(!SPECIAL_EVENTS.contains_key(&NaiveDate::from_ymd_opt(2026, 4, 10).unwrap()));
        assert!(!SPECIAL_EVENTS.contains_key(&NaiveDate::from_ymd_opt(2026, 4, 13).unwrap()));
    }

    #[test]
    fn test_promotion_bounds_are_inclusive() {
        let promo = OngoingPromotion {
            name: "Bourses".to_string(),
            description: String::new(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        };
        assert!(promo.contains(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()));
        assert!(promo.contains(NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()));
        assert!(!promo.contains(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()));
    }
}
