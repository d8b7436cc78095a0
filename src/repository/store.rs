//! Key/value store mirrored to a JSON file, the server-side stand-in for the
//! browser's `localStorage`

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::RwLock;

use crate::error::AppResult;

#[derive(Clone)]
pub struct LocalStore {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
    /// None for a store that lives in memory only
    path: Option<PathBuf>,
}

impl LocalStore {
    /// Open the store backed by `path`. A missing file yields an empty store;
    /// an unreadable or corrupted one is logged and also yields an empty store.
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Ignoring corrupted store file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Cannot read store file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        tracing::debug!("Opened local store {} ({} keys)", path.display(), entries.len());

        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
            path: Some(path),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            entries: Arc::new(RwLock::new(BTreeMap::new())),
            path: None,
        }
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn set_item(&self, key: &str, value: String) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        let mut next = entries.clone();
        next.insert(key.to_string(), value);
        self.flush(&next).await?;
        *entries = next;
        Ok(())
    }

    pub async fn remove_item(&self, key: &str) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.flush(&next).await?;
        *entries = next;
        Ok(())
    }

    /// Remove every key starting with `prefix`, returning how many were removed
    pub async fn remove_prefixed(&self, prefix: &str) -> AppResult<usize> {
        let mut entries = self.entries.write().await;
        let mut next = entries.clone();
        next.retain(|key, _| !key.starts_with(prefix));
        let removed = entries.len() - next.len();
        if removed > 0 {
            self.flush(&next).await?;
            *entries = next;
        }
        Ok(removed)
    }

    pub async fn keys(&self) -> Vec<String> {
        self.entries.read().await.keys().cloned().collect()
    }

    /// Rewrite the backing file with `entries`. Called with the write lock
    /// held, before the in-memory map takes the new contents.
    async fn flush(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = LocalStore::open(&path).await.unwrap();
        store.set_item("theme", "light".to_string()).await.unwrap();
        store.set_item("language", "en".to_string()).await.unwrap();
        store.remove_item("language").await.unwrap();

        let reopened = LocalStore::open(&path).await.unwrap();
        assert_eq!(reopened.get_item("theme").await.as_deref(), Some("light"));
        assert_eq!(reopened.get_item("language").await, None);
    }

    #[tokio::test]
    async fn test_corrupted_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = LocalStore::open(&path).await.unwrap();
        assert!(store.keys().await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_prefixed() {
        let store = LocalStore::in_memory();
        store.set_item("form_cache_a", "{}".to_string()).await.unwrap();
        store.set_item("form_cache_b", "{}".to_string()).await.unwrap();
        store.set_item("theme", "dark".to_string()).await.unwrap();

        assert_eq!(store.remove_prefixed("form_cache_").await.unwrap(), 2);
        assert_eq!(store.keys().await, vec!["theme".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the store's directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let store = LocalStore::open(blocker.join("store.json")).await.unwrap();
        assert!(store.set_item("theme", "light".to_string()).await.is_err());
        assert_eq!(store.get_item("theme").await, None);
        assert!(store.keys().await.is_empty());
    }
}
