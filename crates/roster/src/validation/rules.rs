//! Built-in field validation rules.
//!
//! Each field is described by data: whether it is required, an optional
//! pattern its trimmed value must match, and the message shown when it
//! does not. Adding a field or tightening a rule is an edit to this table.

use regex::Regex;

use crate::record::FieldKind;

/// A compiled validation rule for one field.
#[derive(Debug)]
pub struct FieldRule {
    /// Field this rule applies to.
    pub kind: FieldKind,

    /// Message shown when the pattern does not match.
    pub mismatch_message: &'static str,

    /// The compiled pattern, if the field has one beyond being non-empty.
    regex: Option<Regex>,
}

impl FieldRule {
    /// Create a rule that only requires a non-empty value.
    #[must_use]
    pub fn required(kind: FieldKind) -> Self {
        Self {
            kind,
            mismatch_message: "",
            regex: None,
        }
    }

    /// Create a rule with a pattern.
    ///
    /// # Panics
    ///
    /// Panics if the regex pattern is invalid.
    #[must_use]
    pub fn pattern(kind: FieldKind, pattern: &str, mismatch_message: &'static str) -> Self {
        Self {
            kind,
            mismatch_message,
            regex: Some(Regex::new(pattern).expect("Invalid regex pattern")),
        }
    }

    /// Check whether a trimmed, non-empty value satisfies the pattern.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.regex.as_ref().map_or(true, |r| r.is_match(value))
    }

    /// The source of the pattern, if any.
    #[must_use]
    pub fn pattern_str(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }
}

/// Get all built-in field rules, in form order.
#[must_use]
pub fn builtin_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::pattern(
            FieldKind::Name,
            r"^[a-zA-Z\s]+$",
            "Name must contain only letters and spaces.",
        ),
        FieldRule::pattern(
            FieldKind::StudentId,
            r"^[0-9]+$",
            "Student ID must contain only numbers.",
        ),
        FieldRule::required(FieldKind::Class),
        FieldRule::pattern(
            FieldKind::RollNo,
            r"^[0-9]+$",
            "Roll No. must contain only numbers.",
        ),
    ]
}
