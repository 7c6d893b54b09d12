//! Storage layer for roster.
//!
//! Records live in a single named slot of a key-value store, serialized as
//! a JSON array. The [`SlotStorage`] trait is the seam between the record
//! store and where the bytes end up: [`SqliteStorage`] persists them in a
//! database file, [`MemoryStorage`] keeps them in process.

mod memory;
pub mod migrations;
pub mod schema;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::{SlotInfo, SqliteStorage};

use crate::error::Result;
use crate::record::Record;

/// Default name of the slot holding the record list.
pub const DEFAULT_SLOT_KEY: &str = "studentRegistrationRecords";

/// A key-value store of named string slots.
pub trait SlotStorage {
    /// Read a slot. Returns `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write a slot, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: SlotStorage + ?Sized> SlotStorage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

/// Serialize a record list for storage.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_records(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Parse a stored record list.
///
/// JSON `null` decodes to an empty list.
///
/// # Errors
///
/// Returns an error if `raw` is not a JSON array of records.
pub fn decode_records(raw: &str) -> std::result::Result<Vec<Record>, serde_json::Error> {
    let records: Option<Vec<Record>> = serde_json::from_str(raw)?;
    Ok(records.unwrap_or_default())
}
