//! `roster` - CLI for the student record store
//!
//! This binary is a thin front end: it parses arguments, calls into the
//! record store, and renders the resulting view model as text or JSON.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use roster::cli::{
    CheckCommand, Cli, Command, ConfigCommand, ListCommand, OutputFormat, ShowCommand,
    UpdateCommand,
};
use roster::{
    init_logging, Config, FieldCheck, FieldKind, RecordFields, RecordStore, SqliteStorage,
    SubmitOutcome, TableView, ValidationReport, Viewport,
};

type Store = RecordStore<SqliteStorage>;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config_path = cli.config;
    let load_config = || Config::load_from(config_path.clone());

    match cli.command {
        Command::Status(cmd) => {
            let store = open_store(&load_config()?)?;
            handle_status(&store, cmd.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::List(cmd) => {
            let config = load_config()?;
            let store = open_store(&config)?;
            handle_list(&store, &cmd, config.viewport())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Add(cmd) => {
            let mut store = open_store(&load_config()?)?;
            handle_submit(&mut store, &cmd.fields())
        }
        Command::Update(cmd) => {
            let mut store = open_store(&load_config()?)?;
            handle_update(&mut store, &cmd)
        }
        Command::Delete(cmd) => {
            let mut store = open_store(&load_config()?)?;
            if store.delete(cmd.index)? {
                println!("Deleted record {}.", cmd.index);
            } else {
                println!("No record at index {}.", cmd.index);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Show(cmd) => {
            let store = open_store(&load_config()?)?;
            handle_show(&store, &cmd)
        }
        Command::Check(cmd) => Ok(handle_check(&cmd)),
        Command::Config(cmd) => handle_config(config_path.clone(), cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<Store> {
    let path = config.database_path();
    let storage = SqliteStorage::open(&path)
        .with_context(|| format!("opening record database {}", path.display()))?;
    Ok(RecordStore::open(storage, config.storage.slot_key.as_str()))
}

fn handle_status(store: &Store, json: bool) -> anyhow::Result<()> {
    let info = store.storage().slot_info(store.key())?;
    let updated_at = info
        .as_ref()
        .and_then(|i| i.updated_at)
        .map(|t| t.to_rfc3339());

    if json {
        let status = serde_json::json!({
            "database_path": store.storage().path(),
            "slot_key": store.key(),
            "records": store.len(),
            "slot_bytes": info.as_ref().map_or(0, |i| i.size_bytes),
            "updated_at": updated_at,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("roster status");
        println!("-------------");
        println!("Database:      {}", store.storage().path().display());
        println!("Slot:          {}", store.key());
        println!("Records:       {}", store.len());
        match info {
            Some(info) => {
                println!("Slot size:     {} bytes", info.size_bytes);
                println!(
                    "Last saved:    {}",
                    updated_at.as_deref().unwrap_or("unknown")
                );
            }
            None => println!("Slot size:     (never saved)"),
        }
    }
    Ok(())
}

fn handle_list(store: &Store, cmd: &ListCommand, viewport: Viewport) -> anyhow::Result<()> {
    let table = store.table();

    if cmd.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(table.rows())?);
        return Ok(());
    }

    if table.is_empty() {
        println!("No records yet.");
        return Ok(());
    }

    let window = viewport.window(table.len(), cmd.offset);
    match cmd.format {
        OutputFormat::Table => print_table(&table, window.clone()),
        _ => {
            for row in &table.rows()[window.clone()] {
                println!(
                    "{}: {} | {} | {} | {}",
                    row.index, row.name, row.student_id, row.class_name, row.roll_no
                );
            }
        }
    }

    if viewport.is_scrolling(viewport.content_height(table.len())) {
        println!(
            "Showing rows {}-{} of {} (use --offset to scroll)",
            window.start + 1,
            window.end,
            table.len()
        );
    }
    Ok(())
}

fn print_table(table: &TableView, window: std::ops::Range<usize>) {
    let header = [
        "#".to_string(),
        FieldKind::Name.label().to_string(),
        FieldKind::StudentId.label().to_string(),
        FieldKind::Class.label().to_string(),
        FieldKind::RollNo.label().to_string(),
    ];
    let lines: Vec<[String; 5]> = table.rows()[window]
        .iter()
        .map(|row| {
            [
                row.index.to_string(),
                row.name.clone(),
                row.student_id.clone(),
                row.class_name.clone(),
                row.roll_no.clone(),
            ]
        })
        .collect();

    let mut widths = header.clone().map(|h| h.chars().count());
    for line in &lines {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    println!("{}", render_row(&header, &widths));
    println!("{}", widths.map(|w| "-".repeat(w)).join("  "));
    for line in &lines {
        println!("{}", render_row(line, &widths));
    }
}

/// Pad every cell but the last to its column width.
fn render_row(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i == last {
                cell.clone()
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn handle_submit(store: &mut Store, fields: &RecordFields) -> anyhow::Result<ExitCode> {
    match store.submit(fields)? {
        SubmitOutcome::Added { index } => {
            println!("Added record {index}.");
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Updated { index } => {
            println!("Updated record {index}.");
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Rejected(report) => {
            print_report(&report);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn handle_update(store: &mut Store, cmd: &UpdateCommand) -> anyhow::Result<ExitCode> {
    let Some(mut fields) = store.begin_edit(cmd.index) else {
        println!("No record at index {}.", cmd.index);
        return Ok(ExitCode::SUCCESS);
    };
    cmd.apply_to(&mut fields);
    handle_submit(store, &fields)
}

fn print_report(report: &ValidationReport) {
    for kind in FieldKind::ALL {
        if let Some(message) = report.message_for(kind) {
            eprintln!("{}: {message}", kind.label());
        }
    }
}

fn handle_show(store: &Store, cmd: &ShowCommand) -> anyhow::Result<ExitCode> {
    let Some(record) = store.get(cmd.index) else {
        println!("No record at index {}.", cmd.index);
        return Ok(ExitCode::SUCCESS);
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        for kind in FieldKind::ALL {
            println!("{:<12}{}", format!("{}:", kind.label()), record.field(kind));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_check(cmd: &CheckCommand) -> ExitCode {
    let kind = FieldKind::from(cmd.field);
    match roster::Validator::new().validate_field(kind, &cmd.value) {
        FieldCheck::Valid => {
            println!("{}: valid", kind.label());
            ExitCode::SUCCESS
        }
        FieldCheck::Invalid { message } => {
            println!("{}: {message}", kind.label());
            ExitCode::FAILURE
        }
    }
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Slot key:           {}", config.storage.slot_key);
                println!();
                println!("[Display]");
                println!("  Scroll max height:  {}", config.display.scroll_max_height);
                println!("  Row height:         {}", config.display.row_height);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            if let Err(e) = Config::load_from(Some(path)) {
                eprintln!("Configuration error: {e}");
                return Ok(ExitCode::FAILURE);
            }
            println!("Configuration is valid.");
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "roster_main_{}_{}.toml",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn run_args(args: &[&str]) -> anyhow::Result<ExitCode> {
        run(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_config_validate_reports_bad_config_file() {
        let path = write_temp_config("zero_row", "[display]\nrow_height = 0\n");
        let path_str = path.to_string_lossy().into_owned();

        let via_flag = run_args(&["roster", "-C", &path_str, "config", "validate"]).unwrap();
        let via_file = run_args(&["roster", "config", "validate", "--file", &path_str]).unwrap();

        assert_eq!(via_flag, ExitCode::FAILURE);
        assert_eq!(via_file, ExitCode::FAILURE);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_config_validate_accepts_good_config_file() {
        let path = write_temp_config("good", "[display]\nrow_height = 30\n");
        let path_str = path.to_string_lossy().into_owned();

        let code = run_args(&["roster", "-C", &path_str, "config", "validate"]).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_check_ignores_broken_config() {
        let path = write_temp_config("garbage", "garbage[");
        let path_str = path.to_string_lossy().into_owned();

        let valid = run_args(&["roster", "-C", &path_str, "check", "name", "John"]).unwrap();
        let invalid = run_args(&["roster", "-C", &path_str, "check", "name", "John123"]).unwrap();

        assert_eq!(valid, ExitCode::SUCCESS);
        assert_eq!(invalid, ExitCode::FAILURE);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_config_show_fails_on_broken_config() {
        let path = write_temp_config("broken_show", "garbage[");
        let path_str = path.to_string_lossy().into_owned();

        assert!(run_args(&["roster", "-C", &path_str, "config", "show"]).is_err());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_render_row_has_no_trailing_padding() {
        let cells = ["0".to_string(), "Jane Doe".to_string(), "5".to_string()];
        let row = render_row(&cells, &[3, 10, 8]);

        assert_eq!(row, "0    Jane Doe    5");
        assert_eq!(row, row.trim_end());
    }
}
