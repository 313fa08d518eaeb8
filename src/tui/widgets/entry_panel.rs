//! Log entry panel.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::tui::state::{AppState, Focus};
use crate::tui::style::Styles;
use crate::view::EntryList;

/// Renders the current page of entries, oldest at the top.
pub fn render_entries(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let dims = state.filter.dimensions();
    let focused = state.focus == Focus::Entries;

    let header = Row::new(vec![
        Cell::from("Time"),
        Cell::from(dims.primary_name()),
        Cell::from(dims.secondary_name()),
        Cell::from("Message"),
    ])
    .style(Styles::table_header());

    let rows: Vec<Row> = state
        .entries
        .entries()
        .iter()
        .map(|entry| Row::new(EntryList::cells(entry, dims).map(Cell::from)))
        .collect();

    let (primary, secondary) = state.filter.selection();
    let title = format!(
        " Entries {}/{} page {} ({}) ",
        primary.unwrap_or("*"),
        secondary.unwrap_or("*"),
        state.filter.page() + 1,
        state.entries.len()
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(19),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(Span::styled(title, Styles::border(focused)))
            .borders(Borders::ALL)
            .border_style(Styles::border(focused)),
    )
    .row_highlight_style(Styles::selected());

    let selected = (!state.entries.is_empty()).then(|| state.entries.selected_index());
    state.entry_table_state.select(selected);
    frame.render_stateful_widget(table, area, &mut state.entry_table_state);
}
