//! Storage layer for the tock timer.
//!
//! Provides append-only persistence for time entries using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! The timer owns a single `Database` on its event-loop thread, so no
//! synchronization is needed.
//!
//! # Schema
//!
//! One table, `time_entries`, with an auto-incrementing `id`, a free-form
//! `category` and the rounded `time_spent_mins`. The column layout matches
//! older `time_tracker.db` files so existing records can be opened in place.
//! A `CHECK` constraint enforces that minutes are a positive multiple of five.

use std::path::Path;

use rusqlite::{Connection, params};
use thiserror::Error;
use tock_core::{CategoryTotal, EntryStore, NewTimeEntry, TimeEntry};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored minute count does not fit the entry model.
    #[error("invalid minutes for entry {id}: {value}")]
    InvalidMinutes { id: i64, value: i64 },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS time_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                time_spent_mins INTEGER NOT NULL
                    CHECK (time_spent_mins >= 5 AND time_spent_mins % 5 = 0)
            );

            CREATE INDEX IF NOT EXISTS idx_time_entries_category ON time_entries(category);
            ",
        )?;
        Ok(())
    }

    /// Appends one entry and returns it with its assigned id.
    pub fn insert_entry(&mut self, entry: &NewTimeEntry) -> Result<TimeEntry, DbError> {
        self.conn.execute(
            "INSERT INTO time_entries (category, time_spent_mins) VALUES (?, ?)",
            params![entry.category, entry.time_spent_mins],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(
            id,
            category = %entry.category,
            minutes = entry.time_spent_mins,
            "inserted time entry"
        );
        Ok(TimeEntry {
            id,
            category: entry.category.clone(),
            time_spent_mins: entry.time_spent_mins,
        })
    }

    /// Lists each category once, sorted ascending.
    pub fn list_categories(&self) -> Result<Vec<String>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT DISTINCT category
            FROM time_entries
            ORDER BY category ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut categories = Vec::new();
        for row in rows {
            categories.push(row?);
        }
        Ok(categories)
    }

    /// Lists entries newest first, optionally capped at `limit`.
    pub fn list_entries(&self, limit: Option<usize>) -> Result<Vec<TimeEntry>, DbError> {
        // SQLite treats a negative LIMIT as "no limit".
        let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));
        let mut stmt = self.conn.prepare(
            "
            SELECT id, category, time_spent_mins
            FROM time_entries
            ORDER BY id DESC
            LIMIT ?
            ",
        )?;
        let rows = stmt.query_map([limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;
        let mut entries = Vec::new();
        for row in rows {
            let (id, category, minutes) = row?;
            entries.push(TimeEntry {
                id,
                category,
                time_spent_mins: to_minutes(id, minutes)?,
            });
        }
        Ok(entries)
    }

    /// Sums recorded minutes per category, largest total first.
    pub fn category_totals(&self) -> Result<Vec<CategoryTotal>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT category, COUNT(*) AS entries, SUM(time_spent_mins) AS total
            FROM time_entries
            GROUP BY category
            ORDER BY total DESC, category ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                entries: row.get::<_, i64>(1)?.unsigned_abs(),
                total_mins: row.get::<_, i64>(2)?.unsigned_abs(),
            })
        })?;
        let mut totals = Vec::new();
        for row in rows {
            totals.push(row?);
        }
        Ok(totals)
    }

    /// Counts all recorded entries.
    pub fn count_entries(&self) -> Result<u64, DbError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM time_entries", [], |row| row.get(0))?;
        Ok(count.unsigned_abs())
    }
}

impl EntryStore for Database {
    type Error = DbError;

    fn distinct_categories(&self) -> Result<Vec<String>, Self::Error> {
        self.list_categories()
    }

    fn append(&mut self, entry: &NewTimeEntry) -> Result<TimeEntry, Self::Error> {
        self.insert_entry(entry)
    }
}

fn to_minutes(id: i64, value: i64) -> Result<u32, DbError> {
    u32::try_from(value).map_err(|_| DbError::InvalidMinutes { id, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn entry(category: &str, minutes: u32) -> NewTimeEntry {
        NewTimeEntry {
            category: category.to_string(),
            time_spent_mins: minutes,
        }
    }

    fn table_columns(conn: &Connection, table: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({table})"))
            .expect("prepare table_info");
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .expect("query table_info");
        rows.map(|row| row.expect("table_info row")).collect()
    }

    #[test]
    fn open_in_memory_database() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn schema_matches_data_model() {
        let db = Database::open_in_memory().expect("open in-memory db");

        let columns = table_columns(&db.conn, "time_entries");
        assert_eq!(columns, vec!["id", "category", "time_spent_mins"]);
    }

    #[test]
    fn open_is_idempotent_on_disk() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("tock.db");

        {
            let mut db = Database::open(&path).unwrap();
            db.insert_entry(&entry("Work", 10)).unwrap();
        }
        let db = Database::open(&path).unwrap();

        assert_eq!(db.count_entries().unwrap(), 1);
        assert_eq!(db.list_categories().unwrap(), vec!["Work"]);
    }

    #[test]
    fn opens_legacy_table_layout() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("time_tracker.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "
                CREATE TABLE time_entries (
                    id INTEGER NOT NULL,
                    category VARCHAR,
                    time_spent_mins INTEGER,
                    PRIMARY KEY (id)
                );
                INSERT INTO time_entries (category, time_spent_mins) VALUES ('Legacy', 20);
                ",
            )
            .unwrap();
        }

        let mut db = Database::open(&path).unwrap();
        let saved = db.insert_entry(&entry("Work", 5)).unwrap();

        assert_eq!(saved.id, 2);
        assert_eq!(db.list_categories().unwrap(), vec!["Legacy", "Work"]);
    }

    #[test]
    fn append_assigns_increasing_ids() {
        let mut db = Database::open_in_memory().unwrap();

        let first = db.append(&entry("Work", 5)).unwrap();
        let second = db.append(&entry("Work", 10)).unwrap();

        assert!(second.id > first.id);
        assert_eq!(second.category, "Work");
        assert_eq!(second.time_spent_mins, 10);
    }

    #[test]
    fn distinct_categories_reports_each_once() {
        let mut db = Database::open_in_memory().unwrap();
        db.append(&entry("Work", 5)).unwrap();
        db.append(&entry("Reading", 5)).unwrap();

        db.append(&entry("Work", 15)).unwrap();
        let categories = db.distinct_categories().unwrap();

        assert_eq!(categories.iter().filter(|c| *c == "Work").count(), 1);
        assert_eq!(categories, vec!["Reading", "Work"]);
    }

    #[test]
    fn distinct_categories_is_stable_between_reads() {
        let mut db = Database::open_in_memory().unwrap();
        db.append(&entry("b", 5)).unwrap();
        db.append(&entry("a", 5)).unwrap();

        let first: HashSet<String> = db.distinct_categories().unwrap().into_iter().collect();
        let second: HashSet<String> = db.distinct_categories().unwrap().into_iter().collect();

        assert_eq!(first, second);
    }

    #[test]
    fn categories_are_case_sensitive() {
        let mut db = Database::open_in_memory().unwrap();
        db.append(&entry("work", 5)).unwrap();
        db.append(&entry("Work", 5)).unwrap();

        assert_eq!(db.distinct_categories().unwrap().len(), 2);
    }

    #[test]
    fn schema_rejects_off_grid_minutes() {
        let mut db = Database::open_in_memory().unwrap();

        assert!(db.append(&entry("Work", 0)).is_err());
        assert!(db.append(&entry("Work", 7)).is_err());
        assert_eq!(db.count_entries().unwrap(), 0);
    }

    #[test]
    fn list_entries_newest_first_with_limit() {
        let mut db = Database::open_in_memory().unwrap();
        for (category, minutes) in [("a", 5), ("b", 10), ("c", 15)] {
            db.append(&entry(category, minutes)).unwrap();
        }

        let all = db.list_entries(None).unwrap();
        let recent = db.list_entries(Some(2)).unwrap();

        let names: Vec<&str> = all.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].time_spent_mins, 15);
    }

    #[test]
    fn category_totals_sum_minutes() {
        let mut db = Database::open_in_memory().unwrap();
        db.append(&entry("Work", 15)).unwrap();
        db.append(&entry("Email", 5)).unwrap();
        db.append(&entry("Work", 10)).unwrap();
        db.append(&entry("Admin", 5)).unwrap();

        let totals = db.category_totals().unwrap();

        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: "Work".to_string(),
                    entries: 2,
                    total_mins: 25,
                },
                CategoryTotal {
                    category: "Admin".to_string(),
                    entries: 1,
                    total_mins: 5,
                },
                CategoryTotal {
                    category: "Email".to_string(),
                    entries: 1,
                    total_mins: 5,
                },
            ]
        );
    }

    #[test]
    fn empty_database_has_no_categories() {
        let db = Database::open_in_memory().unwrap();

        assert!(db.list_categories().unwrap().is_empty());
        assert!(db.category_totals().unwrap().is_empty());
        assert_eq!(db.count_entries().unwrap(), 0);
    }
}
