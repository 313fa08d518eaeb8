//! Two-level grouped count table.
//!
//! Rows are laid out as:
//!
//! ```text
//! *      *         total
//! app    *         sum for app
//! app    proc      count
//! ...
//! ```
//!
//! The selection is tracked by `(primary, secondary)` so it survives a
//! refresh even when rows move around.

use crate::api::{StatMap, WILDCARD};

use super::navigable::NavigableTable;

/// One line of the stat table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub primary: String,
    pub secondary: String,
    pub count: u64,
}

impl StatRow {
    fn new(primary: &str, secondary: &str, count: u64) -> Self {
        Self {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            count,
        }
    }

    /// Row key, stable across refreshes.
    pub fn key(&self) -> (&str, &str) {
        (&self.primary, &self.secondary)
    }

    /// `*`/`*`: everything.
    pub fn is_total(&self) -> bool {
        self.primary == WILDCARD && self.secondary == WILDCARD
    }

    /// `primary`/`*`: one group.
    pub fn is_group(&self) -> bool {
        self.primary != WILDCARD && self.secondary == WILDCARD
    }
}

/// Builds table rows from a stat response.
pub fn build_rows(stat: &StatMap) -> Vec<StatRow> {
    let total: u64 = stat.values().flat_map(|s| s.values()).sum();
    let mut rows = Vec::with_capacity(1 + stat.len() + stat.values().map(|s| s.len()).sum::<usize>());
    rows.push(StatRow::new(WILDCARD, WILDCARD, total));

    for (primary, secondaries) in stat {
        let group_total = secondaries.values().sum();
        rows.push(StatRow::new(primary, WILDCARD, group_total));
        for (secondary, count) in secondaries {
            rows.push(StatRow::new(primary, secondary, *count));
        }
    }
    rows
}

/// Stat panel state.
#[derive(Debug, Clone, Default)]
pub struct StatTable {
    rows: Vec<StatRow>,
    selected: usize,
}

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the rows, keeping the selected key if it still exists and
    /// falling back to the first row otherwise. Returns the selected row.
    pub fn update(&mut self, stat: &StatMap) -> Option<&StatRow> {
        let previous = self
            .selected_row()
            .map(|r| (r.primary.clone(), r.secondary.clone()));

        self.rows = build_rows(stat);
        self.selected = previous
            .and_then(|(p, s)| self.position_of(&p, &s))
            .unwrap_or(0);

        self.selected_row()
    }

    pub fn rows(&self) -> &[StatRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&StatRow> {
        self.rows.get(self.selected)
    }

    /// Total number of entries matching the current filters.
    pub fn total(&self) -> u64 {
        self.rows.first().map(|r| r.count).unwrap_or(0)
    }

    fn position_of(&self, primary: &str, secondary: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.key() == (primary, secondary))
    }
}

impl NavigableTable for StatTable {
    fn selected(&self) -> usize {
        self.selected
    }

    fn selected_mut(&mut self) -> &mut usize {
        &mut self.selected
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(data: &[(&str, &[(&str, u64)])]) -> StatMap {
        data.iter()
            .map(|(p, secs)| {
                (
                    p.to_string(),
                    secs.iter().map(|(s, c)| (s.to_string(), *c)).collect(),
                )
            })
            .collect()
    }

    fn keys(table: &StatTable) -> Vec<(String, String)> {
        table
            .rows()
            .iter()
            .map(|r| (r.primary.clone(), r.secondary.clone()))
            .collect()
    }

    #[test]
    fn builds_wildcard_rows_with_totals() {
        let rows = build_rows(&stat(&[
            ("sshd", &[("101", 3), ("102", 1)]),
            ("cron", &[("7", 2)]),
        ]));

        let view: Vec<(&str, &str, u64)> = rows
            .iter()
            .map(|r| (r.primary.as_str(), r.secondary.as_str(), r.count))
            .collect();
        assert_eq!(
            view,
            vec![
                ("*", "*", 6),
                ("cron", "*", 2),
                ("cron", "7", 2),
                ("sshd", "*", 4),
                ("sshd", "101", 3),
                ("sshd", "102", 1),
            ]
        );
        assert!(rows[0].is_total());
        assert!(rows[1].is_group());
        assert!(!rows[2].is_group());
    }

    #[test]
    fn empty_stat_still_has_total_row() {
        let mut table = StatTable::new();
        let selected = table.update(&StatMap::new()).cloned();
        assert_eq!(table.rows().len(), 1);
        assert!(selected.unwrap().is_total());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn first_update_selects_first_row() {
        let mut table = StatTable::new();
        assert!(table.selected_row().is_none());
        let row = table.update(&stat(&[("a", &[("1", 1)])])).cloned().unwrap();
        assert!(row.is_total());
        assert_eq!(table.selected_index(), 0);
    }

    #[test]
    fn selection_survives_refresh_when_rows_shift() {
        let mut table = StatTable::new();
        table.update(&stat(&[("b", &[("1", 1)]), ("c", &[("2", 5)])]));
        table.end();
        assert_eq!(table.selected_row().unwrap().key(), ("c", "2"));

        // A new group sorted before "c" pushes the row down.
        let row = table
            .update(&stat(&[("a", &[("9", 1)]), ("b", &[("1", 2)]), ("c", &[("2", 6)])]))
            .cloned()
            .unwrap();
        assert_eq!(row.key(), ("c", "2"));
        assert_eq!(row.count, 6);
        assert_eq!(table.selected_index(), 6);
    }

    #[test]
    fn vanished_selection_falls_back_to_first_row() {
        let mut table = StatTable::new();
        table.update(&stat(&[("a", &[("1", 1)]), ("b", &[("2", 1)])]));
        table.end();
        assert_eq!(table.selected_row().unwrap().key(), ("b", "2"));

        table.update(&stat(&[("a", &[("1", 3)])]));
        assert_eq!(table.selected_index(), 0);
        assert!(table.selected_row().unwrap().is_total());
    }

    #[test]
    fn navigation_is_clamped() {
        let mut table = StatTable::new();
        table.update(&stat(&[("a", &[("1", 1), ("2", 1)])]));
        assert_eq!(keys(&table).len(), 4);

        table.select_up();
        assert_eq!(table.selected_index(), 0);
        table.page_down(10);
        assert_eq!(table.selected_index(), 3);
        table.select_down();
        assert_eq!(table.selected_index(), 3);
        table.page_up(2);
        assert_eq!(table.selected_index(), 1);
        table.home();
        assert_eq!(table.selected_index(), 0);
    }
}
