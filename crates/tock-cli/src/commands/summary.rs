//! Summary command for totals per category.

use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;
use tock_core::CategoryTotal;
use tock_db::Database;

/// JSON shape of the summary.
#[derive(Debug, Serialize)]
struct SummaryJson<'a> {
    categories: &'a [CategoryTotal],
    total_mins: u64,
}

/// Runs the summary command.
pub fn run<W: std::io::Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let totals = db.category_totals()?;

    if json {
        let summary = SummaryJson {
            categories: &totals,
            total_mins: grand_total(&totals),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        write!(writer, "{}", format_summary(&totals))?;
    }
    Ok(())
}

fn grand_total(totals: &[CategoryTotal]) -> u64 {
    totals.iter().map(|t| t.total_mins).sum()
}

/// Format minutes as hours and minutes (e.g., "1h 05m", "45m").
pub fn format_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}h {mins:02}m")
    } else {
        format!("{mins}m")
    }
}

/// Format totals as a table with a closing total row.
pub fn format_summary(totals: &[CategoryTotal]) -> String {
    let mut output = String::new();

    if totals.is_empty() {
        writeln!(output, "No time entries recorded yet.").unwrap();
        return output;
    }

    let width = totals
        .iter()
        .map(|t| t.category.chars().count())
        .max()
        .unwrap_or(0)
        .max("Category".len());

    writeln!(output, "{:<width$}  {:>7}  {:>8}", "Category", "Entries", "Time").unwrap();
    for total in totals {
        writeln!(
            output,
            "{:<width$}  {:>7}  {:>8}",
            total.category,
            total.entries,
            format_minutes(total.total_mins)
        )
        .unwrap();
    }
    let entries: u64 = totals.iter().map(|t| t.entries).sum();
    writeln!(
        output,
        "{:<width$}  {:>7}  {:>8}",
        "Total",
        entries,
        format_minutes(grand_total(totals))
    )
    .unwrap();
    output
}
