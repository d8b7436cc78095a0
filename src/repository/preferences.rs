//! Theme/language preferences and cached form values

use std::collections::BTreeMap;

use chrono::Utc;

use crate::{
    error::AppResult,
    models::{
        enums::{Lang, Theme},
        preferences::{FormCacheEntry, Preferences, UpdatePreferences},
    },
};

use super::store::LocalStore;

const THEME_KEY: &str = "theme";
const LANGUAGE_KEY: &str = "language";
const LEGACY_THEME_KEY: &str = "preferred-theme";
const LEGACY_LANGUAGE_KEY: &str = "preferred-language";

pub const FORM_CACHE_PREFIX: &str = "form_cache_";

#[derive(Clone)]
pub struct PreferencesRepository {
    store: LocalStore,
}

impl PreferencesRepository {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    async fn first_of(&self, keys: [&str; 2]) -> Option<String> {
        for key in keys {
            if let Some(value) = self.store.get_item(key).await {
                return Some(value);
            }
        }
        None
    }

    pub async fn get(&self) -> Preferences {
        let theme = self
            .first_of([THEME_KEY, LEGACY_THEME_KEY])
            .await
            .map(|v| Theme::parse_or_default(&v))
            .unwrap_or_default();
        let language = self
            .first_of([LANGUAGE_KEY, LEGACY_LANGUAGE_KEY])
            .await
            .map(|v| Lang::parse_or_default(&v))
            .unwrap_or_default();
        Preferences { theme, language }
    }

    pub async fn update(&self, data: &UpdatePreferences) -> AppResult<Preferences> {
        if let Some(theme) = data.theme {
            self.store.set_item(THEME_KEY, theme.code().to_string()).await?;
        }
        if let Some(language) = data.language {
            self.store
                .set_item(LANGUAGE_KEY, language.code().to_string())
                .await?;
        }
        Ok(self.get().await)
    }
}

#[derive(Clone)]
pub struct FormCacheRepository {
    store: LocalStore,
}

impl FormCacheRepository {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    fn key(form_id: &str) -> String {
        format!("{}{}", FORM_CACHE_PREFIX, form_id)
    }

    pub async fn save(
        &self,
        form_id: &str,
        data: BTreeMap<String, String>,
    ) -> AppResult<FormCacheEntry> {
        let entry = FormCacheEntry {
            data,
            timestamp: Utc::now(),
        };
        self.store
            .set_item(&Self::key(form_id), serde_json::to_string(&entry)?)
            .await?;
        Ok(entry)
    }

    /// Cached values of a form; a corrupted entry reads as absent
    pub async fn load(&self, form_id: &str) -> Option<FormCacheEntry> {
        let raw = self.store.get_item(&Self::key(form_id)).await?;
        serde_json::from_str(&raw)
            .map_err(|e| tracing::warn!("Ignoring unreadable form cache {}: {}", form_id, e))
            .ok()
    }

    pub async fn clear(&self, form_id: &str) -> AppResult<()> {
        self.store.remove_item(&Self::key(form_id)).await
    }

    pub async fn clear_all(&self) -> AppResult<usize> {
        self.store.remove_prefixed(FORM_CACHE_PREFIX).await
    }
}
