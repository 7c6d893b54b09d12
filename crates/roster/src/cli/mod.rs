//! Command-line interface for roster.
//!
//! This module provides the CLI structure for the `roster` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, CheckCommand, ConfigCommand, DeleteCommand, FieldArg, ListCommand, OutputFormat,
    ShowCommand, StatusCommand, UpdateCommand,
};

/// roster - Keep a validated list of student records
///
/// Add, edit, delete and list student records. Records are stored in a
/// single named slot of a local database.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short = 'C', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors (command output is unaffected)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show where records are stored and how many there are
    Status(StatusCommand),

    /// List all records
    List(ListCommand),

    /// Add a new record
    Add(AddCommand),

    /// Edit an existing record
    Update(UpdateCommand),

    /// Delete a record
    Delete(DeleteCommand),

    /// Show a single record
    Show(ShowCommand),

    /// Validate a value for one field without storing it
    Check(CheckCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}
