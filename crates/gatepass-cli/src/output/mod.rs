//! Output formatting module
//!
//! Table and JSON rendering for CLI commands.

use gatepass_core::UserProfile;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use tabled::{Table, Tabled};

/// Output format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {}. Use 'table' or 'json'", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One field of a profile or session for table display
#[derive(Debug, Serialize, Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl FieldRow {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Rows for a normalized profile, empty fields skipped
pub fn profile_rows(user: &UserProfile) -> Vec<FieldRow> {
    let mut rows = Vec::new();
    let mut push = |field: &str, value: &Option<String>| {
        if let Some(value) = value {
            rows.push(FieldRow::new(field, value));
        }
    };
    push("id", &user.id);
    push("username", &user.username);
    push("name", &user.name);
    push("email", &user.email);
    push("avatar", &user.avatar);
    push("github_id", &user.github_id);
    rows
}

/// Rows for an arbitrary JSON object (raw service responses)
pub fn value_rows(value: &Value) -> Vec<FieldRow> {
    match value.as_object() {
        Some(map) => map
            .iter()
            .map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                FieldRow::new(key, rendered)
            })
            .collect(),
        None => vec![FieldRow::new("value", value.to_string())],
    }
}

/// Print rows in the selected format
pub fn print_fields(rows: &[FieldRow], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("(empty)");
            } else {
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json => {
            let map: serde_json::Map<String, Value> = rows
                .iter()
                .map(|row| (row.field.clone(), Value::String(row.value.clone())))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
    }
    Ok(())
}

/// Print a success message (respects quiet mode)
pub fn print_success(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", colored::Colorize::green(message));
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{}", colored::Colorize::red(message));
}

/// Print an info message (respects quiet mode)
pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}
