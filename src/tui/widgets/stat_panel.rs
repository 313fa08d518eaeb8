//! Stat panel: grouped counts by the two dimensions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::tui::state::{AppState, Focus};
use crate::tui::style::Styles;

/// Renders the stat table. The selected row drives the list filter.
pub fn render_stats(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let dims = state.filter.dimensions();
    let focused = state.focus == Focus::Stats;

    let header = Row::new(vec![
        Cell::from(dims.primary_name()),
        Cell::from(dims.secondary_name()),
        Cell::from("Count"),
    ])
    .style(Styles::table_header());

    let rows: Vec<Row> = state
        .stats
        .rows()
        .iter()
        .map(|row| {
            let style = if row.is_total() {
                Styles::stat_total()
            } else if row.is_group() {
                Styles::stat_group()
            } else {
                Styles::default()
            };
            Row::new(vec![
                Cell::from(row.primary.clone()),
                Cell::from(row.secondary.clone()),
                Cell::from(row.count.to_string()),
            ])
            .style(style)
        })
        .collect();

    let title = format!(
        " Stat ({} rows, {} entries) ",
        state.stats.rows().len(),
        state.stats.total()
    );
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Min(6),
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

    let selected = (!state.stats.is_empty()).then(|| state.stats.selected_index());
    state.stat_table_state.select(selected);
    frame.render_stateful_widget(table, area, &mut state.stat_table_state);
}
