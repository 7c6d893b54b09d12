//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::record::{FieldKind, RecordFields};

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Scroll the table down this many rows
    #[arg(long, default_value = "0")]
    pub offset: usize,
}

/// Add command arguments.
///
/// Omitted fields are submitted blank and rejected by validation, the same
/// as an empty form field.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Student name (letters and spaces)
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Student ID (digits)
    #[arg(short = 'i', long, default_value = "")]
    pub student_id: String,

    /// Class
    #[arg(short, long = "class", default_value = "")]
    pub class_name: String,

    /// Roll number (digits)
    #[arg(short, long, default_value = "")]
    pub roll_no: String,
}

impl AddCommand {
    /// The form input this command submits.
    #[must_use]
    pub fn fields(&self) -> RecordFields {
        RecordFields::new(
            self.name.as_str(),
            self.student_id.as_str(),
            self.class_name.as_str(),
            self.roll_no.as_str(),
        )
    }
}

/// Update command arguments.
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Index of the record to update (as shown by `list`)
    pub index: usize,

    /// New student name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New student ID
    #[arg(short = 'i', long)]
    pub student_id: Option<String>,

    /// New class
    #[arg(short, long = "class")]
    pub class_name: Option<String>,

    /// New roll number
    #[arg(short, long)]
    pub roll_no: Option<String>,
}

impl UpdateCommand {
    /// Overlay the supplied values onto a pre-filled form.
    pub fn apply_to(&self, fields: &mut RecordFields) {
        let changes = [
            (FieldKind::Name, &self.name),
            (FieldKind::StudentId, &self.student_id),
            (FieldKind::Class, &self.class_name),
            (FieldKind::RollNo, &self.roll_no),
        ];
        for (kind, value) in changes {
            if let Some(value) = value {
                fields.set(kind, value.as_str());
            }
        }
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Index of the record to delete (as shown by `list`)
    pub index: usize,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Index of the record to show
    pub index: usize,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Field to validate against
    #[arg(value_enum)]
    pub field: FieldArg,

    /// Value to validate
    pub value: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Field argument for validation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    /// Student name
    Name,
    /// Student ID
    StudentId,
    /// Class
    Class,
    /// Roll number
    RollNo,
}

impl From<FieldArg> for FieldKind {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Name => Self::Name,
            FieldArg::StudentId => Self::StudentId,
            FieldArg::Class => Self::Class,
            FieldArg::RollNo => Self::RollNo,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
