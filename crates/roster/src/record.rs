//! Core record types for roster.
//!
//! This module defines the stored [`Record`], the raw form input
//! [`RecordFields`], and the pure list operations that every mutation of
//! the record list goes through.

use serde::{Deserialize, Serialize};

/// One of the four fields a student record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// The student's name.
    Name,
    /// The student's identifier.
    StudentId,
    /// The class the student belongs to.
    Class,
    /// The student's roll number within the class.
    RollNo,
}

impl FieldKind {
    /// All fields in form order.
    pub const ALL: [Self; 4] = [Self::Name, Self::StudentId, Self::Class, Self::RollNo];

    /// Human-readable label used in validation messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::StudentId => "Student ID",
            Self::Class => "Class",
            Self::RollNo => "Roll No.",
        }
    }

    /// Stable key, matching the serialized record field name.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::StudentId => "studentId",
            Self::Class => "class",
            Self::RollNo => "rollNo",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A stored student record.
///
/// Every field is kept as a trimmed string, including the numeric-looking
/// ones, so leading zeros survive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Letters and spaces only.
    pub name: String,

    /// Digits only.
    pub student_id: String,

    /// Any non-empty text.
    #[serde(rename = "class")]
    pub class_name: String,

    /// Digits only.
    pub roll_no: String,
}

impl Record {
    /// Get the value of a single field.
    #[must_use]
    pub fn field(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::Name => &self.name,
            FieldKind::StudentId => &self.student_id,
            FieldKind::Class => &self.class_name,
            FieldKind::RollNo => &self.roll_no,
        }
    }

    /// Convert back into form input, e.g. to pre-fill an edit form.
    #[must_use]
    pub fn to_fields(&self) -> RecordFields {
        RecordFields {
            name: self.name.clone(),
            student_id: self.student_id.clone(),
            class_name: self.class_name.clone(),
            roll_no: self.roll_no.clone(),
        }
    }
}

/// Raw, untrimmed form input for a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    /// Name as typed.
    pub name: String,
    /// Student ID as typed.
    pub student_id: String,
    /// Class as typed.
    pub class_name: String,
    /// Roll number as typed.
    pub roll_no: String,
}

impl RecordFields {
    /// Create form input from the four raw values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        student_id: impl Into<String>,
        class_name: impl Into<String>,
        roll_no: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            student_id: student_id.into(),
            class_name: class_name.into(),
            roll_no: roll_no.into(),
        }
    }

    /// Get the raw value of a single field.
    #[must_use]
    pub fn get(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::Name => &self.name,
            FieldKind::StudentId => &self.student_id,
            FieldKind::Class => &self.class_name,
            FieldKind::RollNo => &self.roll_no,
        }
    }

    /// Replace the raw value of a single field.
    pub fn set(&mut self, kind: FieldKind, value: impl Into<String>) {
        let slot = match kind {
            FieldKind::Name => &mut self.name,
            FieldKind::StudentId => &mut self.student_id,
            FieldKind::Class => &mut self.class_name,
            FieldKind::RollNo => &mut self.roll_no,
        };
        *slot = value.into();
    }

    /// Check whether any field is blank after trimming.
    #[must_use]
    pub fn has_empty_fields(&self) -> bool {
        FieldKind::ALL.iter().any(|&k| self.get(k).trim().is_empty())
    }

    /// Build the stored record, trimming every field.
    #[must_use]
    pub fn to_record(&self) -> Record {
        Record {
            name: self.name.trim().to_string(),
            student_id: self.student_id.trim().to_string(),
            class_name: self.class_name.trim().to_string(),
            roll_no: self.roll_no.trim().to_string(),
        }
    }
}

/// Insert or replace a record.
///
/// With a cursor that points inside the list the record replaces that
/// index; otherwise it is appended. The returned list is authoritative.
#[must_use]
pub fn add_or_update(mut list: Vec<Record>, record: Record, cursor: Option<usize>) -> Vec<Record> {
    match cursor {
        Some(index) if index < list.len() => list[index] = record,
        _ => list.push(record),
    }
    list
}

/// Remove the record at `index`. Out of range is a no-op.
#[must_use]
pub fn delete(mut list: Vec<Record>, index: usize) -> Vec<Record> {
    if index < list.len() {
        list.remove(index);
    }
    list
}

/// Where an edit cursor lands after the record at `deleted` is removed.
///
/// Deleting the edited record clears the cursor; deleting an earlier one
/// shifts it down by one.
#[must_use]
pub fn cursor_after_delete(cursor: Option<usize>, deleted: usize) -> Option<usize> {
    match cursor {
        Some(c) if c == deleted => None,
        Some(c) if c > deleted => Some(c - 1),
        other => other,
    }
}
