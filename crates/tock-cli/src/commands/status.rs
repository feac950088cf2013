//! Status command for showing where entries are stored.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tock_db::Database;

use super::summary::format_minutes;

pub fn run<W: Write>(writer: &mut W, db: &Database, database_path: &Path) -> Result<()> {
    let count = db.count_entries()?;

    writeln!(writer, "tock status")?;
    writeln!(writer, "Database: {}", database_path.display())?;

    if count == 0 {
        writeln!(writer, "No time entries recorded.")?;
        return Ok(());
    }

    let totals = db.category_totals()?;
    let minutes: u64 = totals.iter().map(|t| t.total_mins).sum();
    writeln!(writer, "Entries:    {count}")?;
    writeln!(writer, "Categories: {}", totals.len())?;
    writeln!(writer, "Tracked:    {}", format_minutes(minutes))?;

    Ok(())
}
