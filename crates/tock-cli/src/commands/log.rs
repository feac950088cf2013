//! Log command for showing recent time entries.

use std::fmt::Write;

use anyhow::Result;
use tock_core::TimeEntry;
use tock_db::Database;

/// Runs the log command, printing the newest entries first.
pub fn run<W: std::io::Write>(
    writer: &mut W,
    db: &Database,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let entries = db.list_entries(limit)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else {
        write!(writer, "{}", format_entries(&entries))?;
    }
    Ok(())
}

/// Format entries as a table.
pub fn format_entries(entries: &[TimeEntry]) -> String {
    let mut output = String::new();

    if entries.is_empty() {
        writeln!(output, "No time entries recorded yet.").unwrap();
        return output;
    }

    let width = entries
        .iter()
        .map(|e| e.category.chars().count())
        .max()
        .unwrap_or(0)
        .max("Category".len());

    writeln!(output, "{:<5}  {:<width$}  {:>7}", "ID", "Category", "Minutes").unwrap();
    for entry in entries {
        writeln!(
            output,
            "{:<5}  {:<width$}  {:>7}",
            entry.id, entry.category, entry.time_spent_mins
        )
        .unwrap();
    }
    output
}
