//! Categories command for listing every recorded category.

use std::io::Write;

use anyhow::Result;
use tock_db::Database;

/// Runs the categories command.
pub fn run<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let categories = db.list_categories()?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&categories)?)?;
        return Ok(());
    }

    if categories.is_empty() {
        writeln!(writer, "No categories recorded yet.")?;
        return Ok(());
    }

    for category in &categories {
        writeln!(writer, "{category}")?;
    }
    Ok(())
}
