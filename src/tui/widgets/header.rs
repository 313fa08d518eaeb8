//! Header widget showing time, mode, server and status.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;

use crate::tui::state::AppState;
use crate::tui::style::{Styles, Theme};

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(22), // Time
        Constraint::Length(10), // Mode
        Constraint::Min(20),    // Server
        Constraint::Length(48), // Error/Status/Updated
    ])
    .split(area);

    let time_str = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    frame.render_widget(Paragraph::new(time_str).style(Styles::header()), chunks[0]);

    let (mode_str, mode_style) = if state.filter.follow() {
        (" FOLLOW ", Styles::follow())
    } else {
        (" PAUSED ", Styles::header())
    };
    frame.render_widget(Paragraph::new(mode_str).style(mode_style), chunks[1]);

    frame.render_widget(
        Paragraph::new(state.server.as_str()).style(Styles::header()),
        chunks[2],
    );

    let (right_content, right_style) = if let Some(err) = state.current_error() {
        (err.to_string(), Styles::critical().bg(Theme::HEADER_BG))
    } else if let Some(msg) = &state.status_message {
        (msg.clone(), Styles::warning().bg(Theme::HEADER_BG))
    } else {
        let text = state
            .last_update
            .map(|t| format!("updated {}", t.format("%H:%M:%S")))
            .unwrap_or_else(|| "loading...".to_string());
        (text, Styles::header())
    };
    frame.render_widget(Paragraph::new(right_content).style(right_style), chunks[3]);
}
