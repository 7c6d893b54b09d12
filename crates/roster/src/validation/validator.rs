//! Field and record validation.

use tracing::{debug, trace};

use super::rules::{builtin_rules, FieldRule};
use crate::record::{FieldKind, RecordFields};

/// Message reported when a submission has at least one blank field.
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required. Cannot add an empty record.";

/// Outcome of validating a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCheck {
    /// The value is acceptable.
    Valid,

    /// The value was rejected.
    Invalid {
        /// Human-readable reason.
        message: String,
    },
}

impl FieldCheck {
    /// Whether the value was accepted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The rejection message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid { message } => Some(message),
        }
    }
}

/// A rejected field and the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field that failed.
    pub kind: FieldKind,
    /// Why it failed.
    pub message: String,
}

/// Result of validating a whole submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Set when at least one field was blank. Per-field errors are empty then.
    pub aggregate: Option<&'static str>,

    /// One entry per field whose value failed its rule, in form order.
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Whether the submission may be stored.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.aggregate.is_none() && self.errors.is_empty()
    }

    /// The message to surface next to a field, if any.
    ///
    /// The aggregate message is attached to the name field, the first one
    /// in the form.
    #[must_use]
    pub fn message_for(&self, kind: FieldKind) -> Option<&str> {
        if let Some(aggregate) = self.aggregate {
            return (kind == FieldKind::Name).then_some(aggregate);
        }
        self.errors
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.message.as_str())
    }

    /// All messages in display order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        match self.aggregate {
            Some(aggregate) => vec![aggregate],
            None => self.errors.iter().map(|e| e.message.as_str()).collect(),
        }
    }
}

/// Validates form input against a table of field rules.
#[derive(Debug)]
pub struct Validator {
    rules: Vec<FieldRule>,
}

impl Validator {
    /// Create a validator with the built-in rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(builtin_rules())
    }

    /// Create a validator with a custom rule table.
    #[must_use]
    pub fn with_rules(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// The rule table in use.
    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Validate a single field value.
    ///
    /// The value is trimmed first. A field with no rule only needs to be
    /// non-empty.
    #[must_use]
    pub fn validate_field(&self, kind: FieldKind, value: &str) -> FieldCheck {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return FieldCheck::Invalid {
                message: format!("{} is required.", kind.label()),
            };
        }

        match self.rules.iter().find(|r| r.kind == kind) {
            Some(rule) if !rule.matches(trimmed) => {
                trace!(field = %kind, "Field rejected by pattern");
                FieldCheck::Invalid {
                    message: rule.mismatch_message.to_string(),
                }
            }
            _ => FieldCheck::Valid,
        }
    }

    /// Validate a whole submission.
    ///
    /// Blank fields short-circuit to the aggregate message; otherwise every
    /// field is checked and each failure reported.
    #[must_use]
    pub fn validate_record(&self, fields: &RecordFields) -> ValidationReport {
        if fields.has_empty_fields() {
            debug!("Submission has blank fields");
            return ValidationReport {
                aggregate: Some(ALL_FIELDS_REQUIRED),
                errors: Vec::new(),
            };
        }

        let errors = FieldKind::ALL
            .iter()
            .filter_map(|&kind| match self.validate_field(kind, fields.get(kind)) {
                FieldCheck::Valid => None,
                FieldCheck::Invalid { message } => Some(FieldError { kind, message }),
            })
            .collect::<Vec<_>>();

        if !errors.is_empty() {
            debug!(failed = errors.len(), "Submission failed field validation");
        }

        ValidationReport {
            aggregate: None,
            errors,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
