//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Lang
// ---------------------------------------------------------------------------

/// Display language of the site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Fr,
    En,
}

const MONTHS_FR: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin",
    "juillet", "août", "septembre", "octobre", "novembre", "décembre",
];
const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];
const WEEKDAYS_FR: [&str; 7] = ["dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi"];
const WEEKDAYS_EN: [&str; 7] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

impl Lang {
    /// Parse a stored preference value, falling back to French
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Lang::En,
            _ => Lang::Fr,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::En => "en",
        }
    }

    /// Month name, `month` in 1..=12
    pub fn month_name(&self, month: u32) -> &'static str {
        let idx = (month.clamp(1, 12) - 1) as usize;
        match self {
            Lang::Fr => MONTHS_FR[idx],
            Lang::En => MONTHS_EN[idx],
        }
    }

    /// Weekday name, `weekday` counted from Sunday = 0
    pub fn weekday_name(&self, weekday: u8) -> &'static str {
        let idx = (weekday % 7) as usize;
        match self {
            Lang::Fr => WEEKDAYS_FR[idx],
            Lang::En => WEEKDAYS_EN[idx],
        }
    }

    /// One-letter column headers of a month grid, Sunday first
    pub fn weekday_initials(&self) -> [&'static str; 7] {
        match self {
            Lang::Fr => ["D", "L", "M", "M", "J", "V", "S"],
            Lang::En => ["S", "M", "T", "W", "T", "F", "S"],
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Lang::Fr => "Français",
            Lang::En => "English",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

// ---------------------------------------------------------------------------
// IceType
// ---------------------------------------------------------------------------

/// Rented ice surface. Left and right halves render differently but share
/// the half-ice rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IceType {
    #[default]
    Full,
    Left,
    Right,
}

impl IceType {
    pub fn is_half(&self) -> bool {
        matches!(self, IceType::Left | IceType::Right)
    }

    pub fn label(&self, lang: Lang) -> &'static str {
        match (self.is_half(), lang) {
            (false, Lang::Fr) => "Surface complète",
            (false, Lang::En) => "Full ice",
            (true, Lang::Fr) => "Demi-glace",
            (true, Lang::En) => "Half ice",
        }
    }
}

// ---------------------------------------------------------------------------
// PeriodId
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum PeriodId {
    Morning,
    Evening,
    Allday,
}

impl PeriodId {
    pub fn label(&self, lang: Lang) -> &'static str {
        match (self, lang) {
            (PeriodId::Morning, Lang::Fr) => "Matinée",
            (PeriodId::Morning, Lang::En) => "Morning",
            (PeriodId::Evening, Lang::Fr) => "Soir",
            (PeriodId::Evening, Lang::En) => "Evening",
            (PeriodId::Allday, Lang::Fr) => "Journée complète",
            (PeriodId::Allday, Lang::En) => "Full day",
        }
    }
}

impl std::str::FromStr for PeriodId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(PeriodId::Morning),
            "evening" => Ok(PeriodId::Evening),
            "allday" => Ok(PeriodId::Allday),
            other => Err(format!("Unknown period: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// AvailabilityStatus
// ---------------------------------------------------------------------------

/// Status of one calendar day, first matching rule wins:
/// promotion, special event, saturation, weekday/weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityStatus {
    Ongoing,
    Upcoming,
    Completed,
    FullyReserved,
    WeekdayAvailable,
    WeekendUnavailable,
    /// Outside the booking season
    Unavailable,
}

impl AvailabilityStatus {
    /// Display color used by the site legend
    pub fn color(&self) -> &'static str {
        match self {
            AvailabilityStatus::Ongoing => "#ffd700",
            AvailabilityStatus::Upcoming => "#5ecf71",
            AvailabilityStatus::Completed => "#4a90e2",
            AvailabilityStatus::FullyReserved => "#c0392b",
            AvailabilityStatus::WeekdayAvailable => "#2ecc71",
            AvailabilityStatus::WeekendUnavailable => "#95a5a6",
            AvailabilityStatus::Unavailable => "#7f8c8d",
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Holiday,
    Religious,
    National,
    Sports,
    Family,
    Scholarship,
}

impl EventCategory {
    pub fn color(&self) -> &'static str {
        match self {
            EventCategory::Holiday => "#e74c3c",
            EventCategory::Religious => "#9b59b6",
            EventCategory::National => "#e67e22",
            EventCategory::Sports => "#27ae60",
            EventCategory::Family => "#3498db",
            EventCategory::Scholarship => "#ffd700",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Holiday,
    Tournament,
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Completed,
    Ongoing,
    Tbd,
}
