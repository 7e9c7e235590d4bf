//! Download-style serializations of the task collection.

use anyhow::{Context, Result};
use std::fmt;
use std::str::FromStr;
use taskify_core::Task;
use time::Date;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array, full record fidelity.
    Json,
    /// Spreadsheet-friendly CSV summary.
    Csv,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Error returned when an export format name is not recognized.
#[derive(Debug, thiserror::Error)]
#[error("unknown export format '{0}', expected json or csv")]
pub struct ExportFormatParseError(String);

impl FromStr for ExportFormat {
    type Err = ExportFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(ExportFormatParseError(other.to_owned())),
        }
    }
}

/// Serialize the collection as a pretty-printed JSON array.
///
/// The output parses back into the same collection, so it doubles as a
/// backup format.
///
/// # Errors
/// Returns an error when serialization fails.
pub fn to_json(tasks: &[Task]) -> Result<String> {
    serde_json::to_string_pretty(tasks).context("failed to serialize tasks as JSON")
}

/// Render the collection as CSV, one row per task in collection order.
///
/// Title and description are double-quoted with embedded quotes doubled;
/// the remaining columns never contain commas. Status renders as
/// `Completed` or `Pending`.
#[must_use]
pub fn to_csv(tasks: &[Task]) -> String {
    let mut csv = String::from("Title,Description,Priority,Due Date,Tag,Status\n");
    for task in tasks {
        let status = if task.completed { "Completed" } else { "Pending" };
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            quoted(&task.title),
            quoted(&task.description),
            task.priority,
            task.date,
            task.tag,
            status
        ));
    }
    csv
}

/// Date-stamped download name, `taskify-tasks-YYYY-MM-DD.<ext>`.
#[must_use]
pub fn export_file_name(format: ExportFormat, reference: Date) -> String {
    format!("taskify-tasks-{reference}.{}", format.extension())
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
