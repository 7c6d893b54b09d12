//! Field validation for student records.
//!
//! Validation is table-driven: [`builtin_rules`] lists one [`FieldRule`]
//! per field, and a [`Validator`] applies that table to single values or
//! whole submissions.
//!
//! # Example
//!
//! ```
//! use roster::record::{FieldKind, RecordFields};
//! use roster::validation::{FieldCheck, Validator};
//!
//! let validator = Validator::new();
//!
//! match validator.validate_field(FieldKind::StudentId, "abc") {
//!     FieldCheck::Valid => println!("ok"),
//!     FieldCheck::Invalid { message } => println!("rejected: {message}"),
//! }
//!
//! let report = validator.validate_record(&RecordFields::new("Jane Doe", "101", "10A", "5"));
//! assert!(report.is_valid());
//! ```

mod rules;
mod validator;

pub use rules::{builtin_rules, FieldRule};
pub use validator::{FieldCheck, FieldError, ValidationReport, Validator, ALL_FIELDS_REQUIRED};
