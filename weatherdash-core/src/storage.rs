//! Key-value storage backends for persisted dashboard state.
//!
//! A storage holds named slots, each with one string value. The saved-location
//! store keeps its whole list in a single slot and replaces it on every write,
//! so backends only need to guarantee that `set` is all-or-nothing.

use std::{fmt::Debug, io, path::PathBuf};

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("storage quota exceeded: {attempted} bytes requested, limit is {limit} bytes")]
    QuotaExceeded { limit: usize, attempted: usize },

    #[error("invalid slot name '{0}': use ASCII letters, digits, '-' or '_'")]
    InvalidSlot(String),
}

pub trait KeyValueStorage: Send + Sync + Debug {
    /// Read a slot. `Ok(None)` means the slot has never been written.
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Replace a slot's value. On error the previous value must be left intact.
    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError>;
}

pub(crate) fn validate_slot(slot: &str) -> Result<(), StorageError> {
    let valid = !slot.is_empty()
        && slot.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid { Ok(()) } else { Err(StorageError::InvalidSlot(slot.to_string())) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_names_are_restricted() {
        assert!(validate_slot("savedLocations").is_ok());
        assert!(validate_slot("saved_locations-v2").is_ok());

        for bad in ["", "../etc", "a/b", "with space", "dot.json"] {
            let err = validate_slot(bad).unwrap_err();
            assert!(matches!(err, StorageError::InvalidSlot(_)), "{bad} should be rejected");
        }
    }
}
