//! Log entry list shown oldest to newest.

use chrono::{DateTime, Local, Utc};

use crate::api::{DimensionSet, LogEntry};

use super::navigable::NavigableTable;

/// Formats an entry timestamp in local time.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// List panel state.
#[derive(Debug, Clone, Default)]
pub struct EntryList {
    entries: Vec<LogEntry>,
    selected: usize,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a server page (newest first) in chronological order and moves
    /// the cursor to the newest entry.
    pub fn load(&mut self, mut newest_first: Vec<LogEntry>) {
        newest_first.reverse();
        self.entries = newest_first;
        self.selected = self.entries.len().saturating_sub(1);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&LogEntry> {
        self.entries.get(self.selected)
    }

    /// Display cells for one entry: timestamp, both dimensions, message.
    pub fn cells(entry: &LogEntry, dimensions: DimensionSet) -> [String; 4] {
        [
            format_timestamp(entry.timestamp),
            dimensions.primary_of(entry).to_string(),
            dimensions.secondary_of(entry).to_string(),
            entry.message.clone(),
        ]
    }
}

impl NavigableTable for EntryList {
    fn selected(&self) -> usize {
        self.selected
    }

    fn selected_mut(&mut self) -> &mut usize {
        &mut self.selected
    }

    fn row_count(&self) -> usize {
        self.entries.len()
    }
}
