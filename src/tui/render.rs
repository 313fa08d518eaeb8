//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::{AppState, InputMode};
use super::widgets::{
    render_entries, render_filter_edit, render_header, render_help, render_quit_confirm,
    render_stats, render_toolbar,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    // Main layout: header, toolbar, content
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(1), // Toolbar
        Constraint::Min(5),    // Content area
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_toolbar(frame, chunks[1], state);

    let content = Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[2]);
    render_stats(frame, content[0], state);
    render_entries(frame, content[1], state);

    // Popups are rendered last to overlay everything.
    if state.show_help {
        render_help(
            frame,
            area,
            state.filter.dimensions(),
            &mut state.help_scroll,
        );
    }

    if let InputMode::Edit(field) = state.input_mode {
        if !state.show_quit_confirm {
            render_filter_edit(
                frame,
                area,
                field,
                &state.edit_input,
                state.edit_error.as_deref(),
            );
        }
    }

    if state.show_quit_confirm {
        render_quit_confirm(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DimensionSet, LogEntry, StatMap};
    use crate::query::FilterState;
    use crate::tui::state::FilterField;
    use chrono::{TimeZone, Utc};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut AppState) -> String {
        let backend = TestBackend::new(140, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn loaded_state(dimensions: DimensionSet) -> AppState {
        let mut state = AppState::new(FilterState::new(dimensions, 50, 500), "http://logs:8082/");
        let mut stat = StatMap::new();
        stat.entry("sshd".into()).or_default().insert("4242".into(), 7);
        state.stats.update(&stat);
        state.entries.load(vec![LogEntry {
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).single().unwrap(),
            hostname: "node-1".into(),
            application: "sshd".into(),
            process: "4242".into(),
            message: "accepted publickey".into(),
        }]);
        state
    }

    #[test]
    fn renders_panels_and_header() {
        let mut state = loaded_state(DimensionSet::ApplicationProcess);
        let screen = draw(&mut state);

        assert!(screen.contains("FOLLOW"));
        assert!(screen.contains("http://logs:8082/"));
        assert!(screen.contains("Application"));
        assert!(screen.contains("Process"));
        assert!(screen.contains("sshd"));
        assert!(screen.contains("4242"));
        assert!(screen.contains("accepted publickey"));
        assert!(screen.contains("Stat (3 rows, 7 entries)"));
        assert_eq!(state.stat_table_state.selected(), Some(0));
    }

    #[test]
    fn hostname_dimensions_change_columns() {
        let mut state = loaded_state(DimensionSet::HostnameApplication);
        let screen = draw(&mut state);
        assert!(screen.contains("Hostname"));
        assert!(screen.contains("node-1"));
    }

    #[test]
    fn error_replaces_update_time() {
        let mut state = loaded_state(DimensionSet::ApplicationProcess);
        state.filter.set_follow(false);
        state.stat_error = Some("stat: server error: db locked".into());
        let screen = draw(&mut state);
        assert!(screen.contains("PAUSED"));
        assert!(screen.contains("db locked"));
    }

    #[test]
    fn popups_overlay_content() {
        let mut state = loaded_state(DimensionSet::ApplicationProcess);
        state.begin_edit(FilterField::From);
        state.edit_input = "yesterday".into();
        state.edit_error = Some("Unrecognized format".into());
        let screen = draw(&mut state);
        assert!(screen.contains("From (UTC)"));
        assert!(screen.contains("Error: Unrecognized format"));

        state.cancel_edit();
        state.show_quit_confirm = true;
        assert!(draw(&mut state).contains("Exit raftview"));
    }

    #[test]
    fn help_scroll_is_clamped() {
        let mut state = loaded_state(DimensionSet::ApplicationProcess);
        state.show_help = true;
        state.help_scroll = usize::MAX;
        let screen = draw(&mut state);
        assert!(screen.contains("raftview Help"));
        assert!(state.help_scroll < 100);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut state = loaded_state(DimensionSet::ApplicationProcess);
        state.show_help = true;
        state.show_quit_confirm = true;
        let backend = TestBackend::new(20, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &mut state)).unwrap();
    }
}
