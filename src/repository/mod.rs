//! Repository layer over the local key/value store

pub mod preferences;
pub mod reservations;
pub mod store;

pub use store::LocalStore;

/// Main repository struct holding the store handle
#[derive(Clone)]
pub struct Repository {
    pub store: LocalStore,
    pub reservations: reservations::ReservationsRepository,
    pub preferences: preferences::PreferencesRepository,
    pub form_cache: preferences::FormCacheRepository,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: LocalStore) -> Self {
        Self {
            reservations: reservations::ReservationsRepository::new(store.clone()),
            preferences: preferences::PreferencesRepository::new(store.clone()),
            form_cache: preferences::FormCacheRepository::new(store.clone()),
            store,
        }
    }
}
