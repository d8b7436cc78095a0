//! Visitor preferences and cached form values

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::enums::{Lang, Theme};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Lang,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePreferences {
    pub theme: Option<Theme>,
    pub language: Option<Lang>,
}

/// Snapshot of a form's field values, stored under `form_cache_<formId>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FormCacheEntry {
    pub data: BTreeMap<String, String>,
    /// Milliseconds since the epoch, as written by the browser
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveFormCache {
    pub data: BTreeMap<String, String>,
}
