use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};

use super::{KeyValueStorage, StorageError, validate_slot};

/// In-process storage. Clones share the same slots, so two stores built over
/// clones of one `MemoryStorage` behave like two windows over one browser
/// profile.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses writes pushing the total stored bytes over `limit`.
    pub fn with_quota(limit: usize) -> Self {
        Self { slots: Arc::default(), quota: Some(limit) }
    }

    /// Total bytes currently held across all slots.
    #[cfg(test)]
    fn used_bytes(&self) -> usize {
        self.slots.lock().values().map(String::len).sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        validate_slot(slot)?;
        Ok(self.slots.lock().get(slot).cloned())
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        validate_slot(slot)?;
        let mut slots = self.slots.lock();

        if let Some(limit) = self.quota {
            let others: usize =
                slots.iter().filter(|(k, _)| k.as_str() != slot).map(|(_, v)| v.len()).sum();
            let attempted = others + value.len();
            if attempted > limit {
                return Err(StorageError::QuotaExceeded { limit, attempted });
            }
        }

        slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }
}
