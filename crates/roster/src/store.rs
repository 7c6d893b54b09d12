//! The record store.
//!
//! [`RecordStore`] owns the in-memory record list, the edit cursor, and
//! the storage backend. Every mutation goes through validation, one of the
//! pure list operations in [`crate::record`], and a save of the whole list.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::record::{self, FieldKind, Record, RecordFields};
use crate::storage::{decode_records, encode_records, SlotStorage, DEFAULT_SLOT_KEY};
use crate::validation::{FieldCheck, ValidationReport, Validator};
use crate::view::TableView;

/// Whether the form is adding a new record or editing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Submitting appends a record.
    #[default]
    Add,
    /// Submitting replaces the record at `index`.
    Edit {
        /// Index of the record being edited.
        index: usize,
    },
}

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new record was appended at `index`.
    Added {
        /// Index of the new record.
        index: usize,
    },
    /// The record at `index` was replaced.
    Updated {
        /// Index of the replaced record.
        index: usize,
    },
    /// Validation failed; nothing changed.
    Rejected(ValidationReport),
}

impl SubmitOutcome {
    /// Whether the submission was stored.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// Student records backed by a storage slot.
#[derive(Debug)]
pub struct RecordStore<S> {
    storage: S,
    key: String,
    records: Vec<Record>,
    edit_cursor: Option<usize>,
    validator: Validator,
}

impl<S: SlotStorage> RecordStore<S> {
    /// Open the store on the default slot, loading whatever it holds.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::open(storage, DEFAULT_SLOT_KEY)
    }

    /// Open the store on the given slot, loading whatever it holds.
    #[must_use]
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        Self::with_validator(storage, key, Validator::new())
    }

    /// Open the store with a custom validator.
    #[must_use]
    pub fn with_validator(storage: S, key: impl Into<String>, validator: Validator) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            records: Vec::new(),
            edit_cursor: None,
            validator,
        };
        store.records = store.load();
        debug!(key = %store.key, count = store.records.len(), "Record store opened");
        store
    }

    /// Read the record list from the slot.
    ///
    /// A missing slot, a backend failure, or data that is not a list of
    /// records all read as an empty list.
    #[must_use]
    pub fn load(&self) -> Vec<Record> {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read record slot, starting empty");
                return Vec::new();
            }
        };

        decode_records(&raw).unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Stored records are malformed, starting empty");
            Vec::new()
        })
    }

    /// Write a record list to the slot, replacing what was there.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be serialized or written.
    pub fn save(&mut self, records: &[Record]) -> Result<()> {
        let raw = encode_records(records)?;
        self.storage.write(&self.key, &raw)?;
        debug!(key = %self.key, count = records.len(), "Records saved");
        Ok(())
    }

    /// Discard in-memory state and re-read the slot.
    pub fn reload(&mut self) {
        self.records = self.load();
        self.edit_cursor = None;
    }

    /// Validate a single field value.
    #[must_use]
    pub fn validate_field(&self, kind: FieldKind, value: &str) -> FieldCheck {
        self.validator.validate_field(kind, value)
    }

    /// Validate a whole submission without storing it.
    #[must_use]
    pub fn validate_record(&self, fields: &RecordFields) -> ValidationReport {
        self.validator.validate_record(fields)
    }

    /// Submit the form.
    ///
    /// Invalid input is rejected with no change. Valid input replaces the
    /// record under the edit cursor, or is appended in add mode; the list is
    /// then saved and the form returns to add mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be saved. The in-memory
    /// list and cursor are left untouched in that case.
    pub fn submit(&mut self, fields: &RecordFields) -> Result<SubmitOutcome> {
        let report = self.validator.validate_record(fields);
        if !report.is_valid() {
            return Ok(SubmitOutcome::Rejected(report));
        }

        let cursor = self.edit_cursor.filter(|&i| i < self.records.len());
        let updated = record::add_or_update(self.records.clone(), fields.to_record(), cursor);
        self.save(&updated)?;
        self.records = updated;
        self.edit_cursor = None;

        let outcome = match cursor {
            Some(index) => SubmitOutcome::Updated { index },
            None => SubmitOutcome::Added {
                index: self.records.len() - 1,
            },
        };
        info!(?outcome, "Record stored");
        Ok(outcome)
    }

    /// Load a record into the form for editing.
    ///
    /// Returns the record's values to pre-fill the form, or `None` (and no
    /// change) if `index` is out of range.
    pub fn begin_edit(&mut self, index: usize) -> Option<RecordFields> {
        let fields = self.records.get(index)?.to_fields();
        self.edit_cursor = Some(index);
        debug!(index, "Editing record");
        Some(fields)
    }

    /// Leave edit mode without changing anything.
    pub fn cancel_edit(&mut self) {
        self.edit_cursor = None;
    }

    /// Delete the record at `index`.
    ///
    /// Returns `false` without writing if `index` is out of range. The edit
    /// cursor follows the shift: it is cleared if it pointed at the deleted
    /// record and moved down if it pointed past it.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be saved.
    pub fn delete(&mut self, index: usize) -> Result<bool> {
        if index >= self.records.len() {
            return Ok(false);
        }

        let updated = record::delete(self.records.clone(), index);
        self.save(&updated)?;
        self.records = updated;
        self.edit_cursor = record::cursor_after_delete(self.edit_cursor, index);
        info!(index, remaining = self.records.len(), "Record deleted");
        Ok(true)
    }

    /// Current form mode.
    #[must_use]
    pub fn mode(&self) -> FormMode {
        match self.edit_cursor {
            Some(index) => FormMode::Edit { index },
            None => FormMode::Add,
        }
    }

    /// Index of the record being edited, if any.
    #[must_use]
    pub fn edit_cursor(&self) -> Option<usize> {
        self.edit_cursor
    }

    /// All records in display order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The record at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Name of the slot this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// View model of the current list.
    #[must_use]
    pub fn table(&self) -> TableView {
        TableView::from_records(&self.records)
    }

    /// Borrow the storage backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::storage::MemoryStorage;
    use crate::validation::ALL_FIELDS_REQUIRED;

    fn fields(name: &str, id: &str) -> RecordFields {
        RecordFields::new(name, id, "10A", "1")
    }

    fn store_with(names: &[&str]) -> RecordStore<MemoryStorage> {
        let mut store = RecordStore::new(MemoryStorage::new());
        for (i, name) in names.iter().enumerate() {
            let outcome = store.submit(&fields(name, &i.to_string())).unwrap();
            assert!(outcome.is_accepted());
        }
        store
    }

    fn names<S: SlotStorage>(store: &RecordStore<S>) -> Vec<&str> {
        store.records().iter().map(|r| r.name.as_str()).collect()
    }

    /// Storage whose writes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyStorage(MemoryStorage);

    impl SlotStorage for ReadOnlyStorage {
        fn read(&self, key: &str) -> Result<Option<String>> {
            self.0.read(key)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::DatabaseQuery(rusqlite::Error::InvalidQuery))
        }
    }

    #[test]
    fn test_open_empty_storage() {
        let store = RecordStore::new(MemoryStorage::new());
        assert!(store.is_empty());
        assert_eq!(store.mode(), FormMode::Add);
        assert_eq!(store.key(), DEFAULT_SLOT_KEY);
    }

    #[test]
    fn test_open_corrupt_slot_is_empty() {
        for raw in ["{not json", "null", r#"{"a":1}"#, "42"] {
            let store = RecordStore::new(MemoryStorage::with_slot(DEFAULT_SLOT_KEY, raw));
            assert!(store.is_empty(), "expected empty for {raw}");
        }
    }

    #[test]
    fn test_submit_adds_and_persists() {
        let mut store = RecordStore::new(MemoryStorage::new());
        let outcome = store
            .submit(&RecordFields::new(" Jane Doe ", "101", "10A", "5"))
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Added { index: 0 });
        assert_eq!(store.len(), 1);
        assert_eq!(store.load(), store.records());
        assert_eq!(store.records()[0].name, "Jane Doe");
    }

    #[test]
    fn test_submit_blank_field_is_rejected_without_change() {
        let mut store = store_with(&["A"]);
        let outcome = store
            .submit(&RecordFields::new("Bob", "", "10A", "2"))
            .unwrap();

        match outcome {
            SubmitOutcome::Rejected(report) => {
                assert_eq!(report.aggregate, Some(ALL_FIELDS_REQUIRED));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(store.len(), 1);
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_submit_invalid_field_keeps_edit_mode() {
        let mut store = store_with(&["A", "B"]);
        store.begin_edit(1).unwrap();

        let outcome = store.submit(&fields("B2", "1")).unwrap();
        assert!(!outcome.is_accepted());
        assert_eq!(store.mode(), FormMode::Edit { index: 1 });
        assert_eq!(names(&store), vec!["A", "B"]);
    }

    #[test]
    fn test_update_replaces_only_cursor_index() {
        let mut store = store_with(&["A", "B", "C"]);
        let prefill = store.begin_edit(1).unwrap();
        assert_eq!(prefill.name, "B");

        let outcome = store.submit(&fields("Zed", "9")).unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated { index: 1 });
        assert_eq!(names(&store), vec!["A", "Zed", "C"]);
        assert_eq!(store.mode(), FormMode::Add);
        assert_eq!(store.load(), store.records());
    }

    #[test]
    fn test_begin_edit_out_of_range_is_noop() {
        let mut store = store_with(&["A"]);
        assert!(store.begin_edit(3).is_none());
        assert_eq!(store.mode(), FormMode::Add);
    }

    #[test]
    fn test_cancel_edit() {
        let mut store = store_with(&["A"]);
        store.begin_edit(0).unwrap();
        store.cancel_edit();
        assert_eq!(store.edit_cursor(), None);

        store.submit(&fields("B", "2")).unwrap();
        assert_eq!(names(&store), vec!["A", "B"]);
    }

    #[test]
    fn test_delete_before_cursor_shifts_cursor() {
        let mut store = store_with(&["A", "B"]);
        store.begin_edit(1).unwrap();

        assert!(store.delete(0).unwrap());
        assert_eq!(names(&store), vec!["B"]);
        assert_eq!(store.edit_cursor(), Some(0));
    }

    #[test]
    fn test_delete_at_cursor_clears_cursor() {
        let mut store = store_with(&["A", "B"]);
        store.begin_edit(1).unwrap();

        assert!(store.delete(1).unwrap());
        assert_eq!(store.mode(), FormMode::Add);
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let mut store = store_with(&["A"]);
        assert!(!store.delete(1).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_failure_leaves_state_untouched() {
        let mut store = RecordStore::new(ReadOnlyStorage::default());
        let result = store.submit(&fields("A", "1"));

        assert!(result.is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_read_failure_is_treated_as_empty() {
        #[derive(Debug)]
        struct BrokenStorage;

        impl SlotStorage for BrokenStorage {
            fn read(&self, _key: &str) -> Result<Option<String>> {
                Err(Error::DatabaseQuery(rusqlite::Error::InvalidQuery))
            }
            fn write(&mut self, _key: &str, _value: &str) -> Result<()> {
                Ok(())
            }
        }

        let store = RecordStore::new(BrokenStorage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_reload_picks_up_external_write_and_clears_cursor() {
        let mut store = store_with(&["A"]);
        store.begin_edit(0).unwrap();

        let other = vec![
            fields("X", "1").to_record(),
            fields("Y", "2").to_record(),
        ];
        store.save(&other).unwrap();
        store.reload();

        assert_eq!(names(&store), vec!["X", "Y"]);
        assert_eq!(store.mode(), FormMode::Add);
    }

    #[test]
    fn test_custom_slot_key() {
        let mut store = RecordStore::open(MemoryStorage::new(), "other");
        store.submit(&fields("A", "1")).unwrap();

        let storage = store.into_storage();
        assert!(storage.read("other").unwrap().is_some());
        assert!(storage.read(DEFAULT_SLOT_KEY).unwrap().is_none());
    }

    #[test]
    fn test_table_reflects_records() {
        let store = store_with(&["A", "B"]);
        let table = store.table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].index, 1);
    }

    #[test]
    fn test_validate_field_delegates() {
        let store = RecordStore::new(MemoryStorage::new());
        assert!(!store.validate_field(FieldKind::Name, "John123").is_valid());
        assert!(store
            .validate_record(&RecordFields::new("Jane", "1", "1A", "1"))
            .is_valid());
    }
}
