//! `roster` - A validated list of student records
//!
//! This library provides the record store behind the `roster` binary:
//! field validation, add/update/delete over an ordered record list, and
//! persistence of that list to a single named storage slot.
//!
//! # Example
//!
//! ```
//! use roster::{MemoryStorage, RecordFields, RecordStore, SubmitOutcome};
//!
//! let mut store = RecordStore::new(MemoryStorage::new());
//! let outcome = store
//!     .submit(&RecordFields::new("Jane Doe", "101", "10A", "5"))
//!     .unwrap();
//! assert_eq!(outcome, SubmitOutcome::Added { index: 0 });
//! assert_eq!(store.load().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod storage;
pub mod store;
pub mod validation;
pub mod view;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{FieldKind, Record, RecordFields};
pub use storage::{MemoryStorage, SlotStorage, SqliteStorage};
pub use store::{FormMode, RecordStore, SubmitOutcome};
pub use validation::{FieldCheck, ValidationReport, Validator};
pub use view::{RecordRow, TableView, Viewport};
