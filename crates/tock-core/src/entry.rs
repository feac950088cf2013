//! Time entry records and the store contract.

use serde::{Deserialize, Serialize};

/// A persisted record of one completed timer session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: i64,
    pub category: String,
    pub time_spent_mins: u32,
}

/// A record that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimeEntry {
    pub category: String,
    pub time_spent_mins: u32,
}

/// Aggregated minutes for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub entries: u64,
    pub total_mins: u64,
}

/// Append-only persistence for time entries.
///
/// Implementations never update or delete existing records.
pub trait EntryStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns each recorded category once. Order is up to the implementation.
    fn distinct_categories(&self) -> Result<Vec<String>, Self::Error>;

    /// Durably writes one new record and returns it with its assigned id.
    fn append(&mut self, entry: &NewTimeEntry) -> Result<TimeEntry, Self::Error>;
}
