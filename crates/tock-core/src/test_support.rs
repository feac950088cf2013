//! In-memory store for unit tests.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::entry::{EntryStore, NewTimeEntry, TimeEntry};

#[derive(Debug, Error)]
#[error("store unavailable")]
pub struct Unavailable;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Vec<TimeEntry>,
    fail_next: bool,
}

impl MemoryStore {
    pub fn with_categories(categories: &[&str]) -> Self {
        let mut store = Self::default();
        for category in categories {
            store
                .append(&NewTimeEntry {
                    category: (*category).to_string(),
                    time_spent_mins: 5,
                })
                .unwrap();
        }
        store
    }

    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub fn fail_next_append(&mut self) {
        self.fail_next = true;
    }
}

impl EntryStore for MemoryStore {
    type Error = Unavailable;

    fn distinct_categories(&self) -> Result<Vec<String>, Self::Error> {
        let unique: BTreeSet<&str> = self.entries.iter().map(|e| e.category.as_str()).collect();
        Ok(unique.into_iter().map(String::from).collect())
    }

    fn append(&mut self, entry: &NewTimeEntry) -> Result<TimeEntry, Self::Error> {
        if std::mem::take(&mut self.fail_next) {
            return Err(Unavailable);
        }
        let saved = TimeEntry {
            id: i64::try_from(self.entries.len()).unwrap() + 1,
            category: entry.category.clone(),
            time_spent_mins: entry.time_spent_mins,
        };
        self.entries.push(saved.clone());
        Ok(saved)
    }
}
