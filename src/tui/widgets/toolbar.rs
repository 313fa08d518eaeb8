//! Filter toolbar: time range, message, follow and pager.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, format_filter_time};
use crate::tui::style::Styles;

/// Renders the toolbar line below the header.
pub fn render_toolbar(frame: &mut Frame, area: Rect, state: &AppState) {
    let filter = &state.filter;
    let value = |v: Option<String>| match v {
        Some(v) => Span::styled(v, Styles::filter_input()),
        None => Span::styled("-", Styles::dim()),
    };

    let follow = if filter.follow() { "[x]" } else { "[ ]" };

    let line = Line::from(vec![
        Span::styled("f", Styles::help_key()),
        Span::styled(" From: ", Styles::help()),
        value(filter.from().map(format_filter_time)),
        Span::styled("  t", Styles::help_key()),
        Span::styled(" To: ", Styles::help()),
        value(filter.to().map(format_filter_time)),
        Span::styled("  /", Styles::help_key()),
        Span::styled(" Message: ", Styles::help()),
        value(filter.message().map(str::to_string)),
        Span::styled("  F", Styles::help_key()),
        Span::styled(format!(" Follow {follow}"), Styles::help()),
        Span::styled("  < >", Styles::help_key()),
        Span::styled(format!(" Page {}", filter.page() + 1), Styles::help()),
        Span::styled("  ?", Styles::help_key()),
        Span::styled(" Help", Styles::help()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
