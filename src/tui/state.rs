//! Application state management.

use chrono::{DateTime, Local, Utc};
use ratatui::widgets::TableState as RatatuiTableState;

use crate::query::{FilterState, Refresh};
use crate::util::parse_time_with_base;
use crate::view::{EntryList, StatTable};

/// Panel receiving navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Stats,
    Entries,
}

impl Focus {
    pub fn next(&self) -> Focus {
        match self {
            Focus::Stats => Focus::Entries,
            Focus::Entries => Focus::Stats,
        }
    }
}

/// Toolbar field being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    From,
    To,
    Message,
}

impl FilterField {
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::From => "From",
            FilterField::To => "To",
            FilterField::Message => "Message",
        }
    }

    pub fn is_time(&self) -> bool {
        matches!(self, FilterField::From | FilterField::To)
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Edit(FilterField),
}

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    pub filter: FilterState,
    pub stats: StatTable,
    pub entries: EntryList,
    pub focus: Focus,

    pub input_mode: InputMode,
    pub edit_input: String,
    pub edit_error: Option<String>,

    pub show_help: bool,
    pub help_scroll: usize,
    pub show_quit_confirm: bool,

    /// Transient notice shown in the header (cleared with Esc).
    pub status_message: Option<String>,
    /// Last stat query failure, cleared by the next successful stat response.
    pub stat_error: Option<String>,
    /// Last list query failure, cleared by the next successful list response.
    pub list_error: Option<String>,
    /// Local time of the last successful stat response.
    pub last_update: Option<DateTime<Local>>,

    /// Server shown in the header.
    pub server: String,

    pub stat_table_state: RatatuiTableState,
    pub entry_table_state: RatatuiTableState,
}

impl AppState {
    pub fn new(filter: FilterState, server: impl Into<String>) -> Self {
        Self {
            filter,
            stats: StatTable::new(),
            entries: EntryList::new(),
            focus: Focus::default(),
            input_mode: InputMode::default(),
            edit_input: String::new(),
            edit_error: None,
            show_help: false,
            help_scroll: 0,
            show_quit_confirm: false,
            status_message: None,
            stat_error: None,
            list_error: None,
            last_update: None,
            server: server.into(),
            stat_table_state: RatatuiTableState::default(),
            entry_table_state: RatatuiTableState::default(),
        }
    }

    /// Opens the editor for a toolbar field, prefilled with its current value.
    pub fn begin_edit(&mut self, field: FilterField) {
        self.input_mode = InputMode::Edit(field);
        self.edit_error = None;
        self.edit_input = match field {
            FilterField::From => self.filter.from().map(format_filter_time),
            FilterField::To => self.filter.to().map(format_filter_time),
            FilterField::Message => self.filter.message().map(str::to_string),
        }
        .unwrap_or_default();
    }

    pub fn cancel_edit(&mut self) {
        self.input_mode = InputMode::Normal;
        self.edit_input.clear();
        self.edit_error = None;
    }

    /// Applies the edited value. Blank input clears the filter. Invalid time
    /// input keeps the editor open with an error.
    pub fn apply_edit(&mut self, now: DateTime<Utc>) -> Refresh {
        let InputMode::Edit(field) = self.input_mode else {
            return Refresh::None;
        };
        let input = self.edit_input.trim();

        let refresh = match field {
            FilterField::Message => {
                let message = (!input.is_empty()).then(|| input.to_string());
                self.filter.set_message(message)
            }
            FilterField::From | FilterField::To => {
                let value = if input.is_empty() {
                    None
                } else {
                    match parse_time_with_base(input, now) {
                        Ok(ts) => Some(ts),
                        Err(e) => {
                            self.edit_error = Some(e.message);
                            return Refresh::None;
                        }
                    }
                };
                if field == FilterField::From {
                    self.filter.set_from(value)
                } else {
                    self.filter.set_to(value)
                }
            }
        };

        self.cancel_edit();
        refresh
    }

    /// Narrows the list to the selected stat row.
    pub fn apply_selection(&mut self) -> Refresh {
        match self.stats.selected_row() {
            Some(row) => {
                let (primary, secondary) = (row.primary.clone(), row.secondary.clone());
                self.filter.select(&primary, &secondary)
            }
            None => Refresh::None,
        }
    }

    /// Most relevant error to surface, if any.
    pub fn current_error(&self) -> Option<&str> {
        self.stat_error.as_deref().or(self.list_error.as_deref())
    }
}

/// Formats a filter timestamp the way the editor accepts it back.
pub fn format_filter_time(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StatMap;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().unwrap()
    }

    fn state() -> AppState {
        AppState::new(FilterState::default(), "http://localhost:8082/")
    }

    #[test]
    fn edit_from_applies_parsed_time_and_resets_offset() {
        let mut s = state();
        s.filter.prev_page();
        s.begin_edit(FilterField::From);
        s.edit_input = "-1h".into();

        assert_eq!(s.apply_edit(now()), Refresh::Stat);
        assert_eq!(s.filter.from(), Some(now() - chrono::Duration::hours(1)));
        assert_eq!(s.filter.offset(), 0);
        assert_eq!(s.input_mode, InputMode::Normal);
    }

    #[test]
    fn invalid_time_keeps_editor_open() {
        let mut s = state();
        s.begin_edit(FilterField::To);
        s.edit_input = "tomorrow-ish".into();

        assert_eq!(s.apply_edit(now()), Refresh::None);
        assert_eq!(s.input_mode, InputMode::Edit(FilterField::To));
        assert!(s.edit_error.is_some());
        assert_eq!(s.filter.to(), None);
    }

    #[test]
    fn blank_edit_clears_filter() {
        let mut s = state();
        s.filter.set_from(Some(now()));
        s.begin_edit(FilterField::From);
        assert_eq!(s.edit_input, "2026-03-01 12:00:00");

        s.edit_input.clear();
        assert_eq!(s.apply_edit(now()), Refresh::Stat);
        assert_eq!(s.filter.from(), None);
    }

    #[test]
    fn edited_time_round_trips_through_editor_format() {
        let mut s = state();
        s.begin_edit(FilterField::From);
        s.edit_input = format_filter_time(now());
        s.apply_edit(now());
        assert_eq!(s.filter.from(), Some(now()));
    }

    #[test]
    fn message_edit_sets_filter() {
        let mut s = state();
        s.begin_edit(FilterField::Message);
        s.edit_input = "  segfault ".into();
        assert_eq!(s.apply_edit(now()), Refresh::Stat);
        assert_eq!(s.filter.message(), Some("segfault"));
    }

    #[test]
    fn apply_selection_uses_selected_row() {
        let mut s = state();
        assert_eq!(s.apply_selection(), Refresh::None);

        let mut stat = StatMap::new();
        stat.entry("sshd".into()).or_default().insert("9".into(), 1);
        s.stats.update(&stat);
        assert_eq!(s.apply_selection(), Refresh::List);
        assert_eq!(s.filter.selection(), (None, None));

        use crate::view::NavigableTable;
        s.stats.end();
        s.apply_selection();
        assert_eq!(s.filter.selection(), (Some("sshd"), Some("9")));
    }

    #[test]
    fn stat_error_takes_precedence() {
        let mut s = state();
        assert!(s.current_error().is_none());
        s.list_error = Some("list down".into());
        assert_eq!(s.current_error(), Some("list down"));
        s.stat_error = Some("stat down".into());
        assert_eq!(s.current_error(), Some("stat down"));
    }
}
