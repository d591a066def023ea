//! Save slot storage
//!
//! The game keeps two small records: the high score table and the output
//! settings. Each lives in a named slot as a JSON blob. Missing or corrupt
//! slots are never an error for the caller; they read as `None` and the
//! owner falls back to its default record.

pub mod file;

use std::collections::HashMap;
use std::io;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use file::FileStorage;

/// Slot holding the high score table
pub const SLOT_HISCORES: &str = "hiscores";
/// Slot holding the output settings
pub const SLOT_SETTINGS: &str = "settings";

/// A keyed blob store
pub trait Storage {
    /// Raw contents of a slot, if it exists and can be read
    fn read(&self, slot: &str) -> Option<Vec<u8>>;
    /// Replace the contents of a slot
    fn write(&mut self, slot: &str, data: &[u8]) -> io::Result<()>;
}

/// Volatile storage, for tests and platforms without a filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, slot: &str) -> Option<Vec<u8>> {
        self.slots.get(slot).cloned()
    }

    fn write(&mut self, slot: &str, data: &[u8]) -> io::Result<()> {
        self.slots.insert(slot.to_string(), data.to_vec());
        Ok(())
    }
}

/// Decode a JSON record from a slot; `None` if absent or undecodable
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, slot: &str) -> Option<T> {
    let bytes = storage.read(slot)?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Ignoring unreadable save slot '{}': {}", slot, err);
            None
        }
    }
}

/// Encode a record into a slot; failures are logged and reported as `false`
pub fn save_json<T: Serialize>(storage: &mut dyn Storage, slot: &str, value: &T) -> bool {
    let json = match serde_json::to_vec(value) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("Could not encode save slot '{}': {}", slot, err);
            return false;
        }
    };
    match storage.write(slot, &json) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Could not write save slot '{}': {}", slot, err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip_through_memory() {
        let mut storage = MemoryStorage::new();
        assert!(save_json(&mut storage, "numbers", &vec![1u32, 2, 3]));
        let back: Option<Vec<u32>> = load_json(&storage, "numbers");
        assert_eq!(back, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_and_corrupt_slots_read_as_none() {
        let mut storage = MemoryStorage::new();
        assert_eq!(load_json::<Vec<u32>>(&storage, "absent"), None);
        storage.write("broken", b"{not json").unwrap();
        assert_eq!(load_json::<Vec<u32>>(&storage, "broken"), None);
    }
}
