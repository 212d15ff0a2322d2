//! Durable list of saved locations.
//!
//! The whole list lives in one storage slot as a JSON array, most recently
//! saved first. [`SavedLocationStore`] is the only writer of that slot: every
//! consumer reads through [`SavedLocationStore::list`] and learns about changes
//! through [`SavedLocationStore::subscribe`] instead of polling the slot.

use chrono::Utc;
use parking_lot::Mutex;

use crate::{
    model::{LocationKey, SavedLocation},
    storage::{KeyValueStorage, StorageError},
};

mod subscribers;

pub use subscribers::Subscription;
use subscribers::Subscribers;

/// Storage slot holding the serialized list.
pub const SAVED_LOCATIONS_SLOT: &str = "savedLocations";

/// Upper bound on stored entries unless configured otherwise.
pub const DEFAULT_MAX_SAVED_LOCATIONS: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid saved location: {0}")]
    InvalidInput(String),

    #[error("failed to persist saved locations: {0}")]
    Persistence(#[from] StorageError),

    #[error("failed to serialize saved locations: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct SavedLocationStore<S: KeyValueStorage> {
    storage: S,
    max_entries: usize,
    /// Raw slot contents as of the last write or sync. Also serializes
    /// read-modify-write cycles.
    last_seen: Mutex<Option<String>>,
    subscribers: Subscribers,
}

impl<S: KeyValueStorage> SavedLocationStore<S> {
    pub fn new(storage: S) -> Self {
        let last_seen = storage.get(SAVED_LOCATIONS_SLOT).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read saved locations at startup");
            None
        });

        Self {
            storage,
            max_entries: DEFAULT_MAX_SAVED_LOCATIONS,
            last_seen: Mutex::new(last_seen),
            subscribers: Subscribers::default(),
        }
    }

    /// Cap the number of stored entries. Saves beyond the cap evict the least
    /// recently saved entries. A cap of zero is treated as one.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    /// All saved locations, most recently saved first.
    ///
    /// Never fails: a missing, unreadable or malformed slot reads as empty.
    pub fn list(&self) -> Vec<SavedLocation> {
        match self.storage.get(SAVED_LOCATIONS_SLOT) {
            Ok(raw) => decode(raw.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read saved locations");
                Vec::new()
            }
        }
    }

    pub fn get(&self, key: &LocationKey) -> Option<SavedLocation> {
        self.list().into_iter().find(|loc| loc.has_key(key))
    }

    /// Save or replace a location and move it to the front of the list.
    ///
    /// `last_updated` is stamped with the current time. Subscribers are
    /// notified only after the new list has been written.
    pub fn save(&self, mut location: SavedLocation) -> Result<(), StoreError> {
        if location.name.trim().is_empty() {
            return Err(StoreError::InvalidInput("name must not be empty".into()));
        }
        if location.country.trim().is_empty() {
            return Err(StoreError::InvalidInput("country must not be empty".into()));
        }
        // JSON has no NaN or infinity; serde_json would write them as null.
        if !location.lat.is_finite() || !location.lon.is_finite() {
            return Err(StoreError::InvalidInput(format!(
                "coordinates must be finite numbers, got lat {} lon {}",
                location.lat, location.lon
            )));
        }

        location.last_updated = Utc::now();
        let key = location.key();

        {
            let mut last_seen = self.last_seen.lock();
            let mut entries = self.load_for_write()?;

            entries.retain(|loc| !loc.has_key(&key));
            entries.insert(0, location);

            if entries.len() > self.max_entries {
                for evicted in entries.drain(self.max_entries..) {
                    tracing::warn!(location = %evicted.key(), "evicted saved location over limit");
                }
            }

            *last_seen = Some(self.write(&entries)?);
            tracing::debug!(location = %key, count = entries.len(), "saved location");
        }

        self.subscribers.notify();
        Ok(())
    }

    /// Remove a location. Unknown keys are a no-op: nothing is written and
    /// nobody is notified.
    pub fn remove(&self, key: &LocationKey) -> Result<(), StoreError> {
        {
            let mut last_seen = self.last_seen.lock();
            let mut entries = self.load_for_write()?;

            let before = entries.len();
            entries.retain(|loc| !loc.has_key(key));
            if entries.len() == before {
                tracing::debug!(location = %key, "remove of unknown location ignored");
                return Ok(());
            }

            *last_seen = Some(self.write(&entries)?);
            tracing::debug!(location = %key, count = entries.len(), "removed location");
        }

        self.subscribers.notify();
        Ok(())
    }

    /// Register a listener called after every successful change, including
    /// changes picked up by [`SavedLocationStore::sync`].
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.subscribers.add(listener)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Check whether another writer has replaced the slot since this store
    /// last wrote or synced it, and notify subscribers once if so.
    ///
    /// Returns `true` when a change was observed.
    pub fn sync(&self) -> bool {
        let changed = {
            let mut last_seen = self.last_seen.lock();
            let current = match self.storage.get(SAVED_LOCATIONS_SLOT) {
                Ok(current) => current,
                Err(e) => {
                    tracing::warn!(error = %e, "could not read saved locations during sync");
                    return false;
                }
            };

            if current == *last_seen {
                false
            } else {
                *last_seen = current;
                true
            }
        };

        if changed {
            tracing::debug!("saved locations changed externally");
            self.subscribers.notify();
        }
        changed
    }

    /// Current entries for a read-modify-write cycle. Malformed contents are
    /// replaced; an unreadable slot aborts the write.
    fn load_for_write(&self) -> Result<Vec<SavedLocation>, StoreError> {
        let raw = self.storage.get(SAVED_LOCATIONS_SLOT)?;
        Ok(decode(raw.as_deref()))
    }

    fn write(&self, entries: &[SavedLocation]) -> Result<String, StoreError> {
        let raw = serde_json::to_string(entries)?;
        self.storage.set(SAVED_LOCATIONS_SLOT, &raw)?;
        Ok(raw)
    }
}

fn decode(raw: Option<&str>) -> Vec<SavedLocation> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "malformed saved locations data, treating as empty");
            Vec::new()
        }
    }
}
