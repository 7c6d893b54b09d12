//! In-memory slot storage.

use std::collections::HashMap;

use super::SlotStorage;
use crate::error::Result;

/// Slot storage held in a `HashMap`.
///
/// Nothing survives the process. Useful for tests and for embedding the
/// store where persistence is handled elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with one slot already holding `value`.
    #[must_use]
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self { slots }
    }

    /// Number of slots currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SlotStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert!(storage.read("k").unwrap().is_none());
    }

    #[test]
    fn test_with_slot() {
        let storage = MemoryStorage::with_slot("k", "v");
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_write_replaces() {
        let mut storage = MemoryStorage::new();
        storage.write("k", "1").unwrap();
        storage.write("k", "2").unwrap();
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("2"));
    }
}
