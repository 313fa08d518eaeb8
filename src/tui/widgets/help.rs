//! Help popup widget with key bindings.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::api::DimensionSet;

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, dimensions: DimensionSet, scroll: &mut usize) {
    // 60% width, 80% height, clamped to 40-80 x 10-30
    let popup_width = (area.width * 60 / 100).clamp(40, 80).min(area.width);
    let popup_height = (area.height * 80 / 100).clamp(10, 30).min(area.height);

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let content = help_lines(dimensions);
    let content_lines = content.len();

    let block = Block::default()
        .title(" raftview Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([
        Constraint::Min(1),    // Content
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    let visible_height = chunks[0].height as usize;
    let max_scroll = content_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, chunks[0]);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        Span::styled(", ", Style::default().fg(Color::DarkGray)),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::styled(" to scroll", Style::default().fg(Color::DarkGray)),
        Span::styled(scroll_info, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(footer, chunks[1]);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(title, Style::default().fg(Color::Yellow)))
}

fn binding(keys: &'static str, text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {keys:<14}"), Style::default().fg(Color::Cyan)),
        Span::raw(text),
    ])
}

fn help_lines(dimensions: DimensionSet) -> Vec<Line<'static>> {
    vec![
        section("Panels:"),
        Line::from(format!(
            "  Stat: counts by {} and {}; \"*\" matches anything",
            dimensions.primary_name(),
            dimensions.secondary_name()
        )),
        Line::from("  Entries: the selected stat row's log lines, oldest first"),
        Line::from(""),
        section("Navigation:"),
        binding("Tab", "switch panel"),
        binding("Up/Down j/k", "move selection"),
        binding("PgUp/PgDn", "move by page"),
        binding("Home/End", "first/last row"),
        Line::from(""),
        section("Filters:"),
        binding("f", "edit From time"),
        binding("t", "edit To time"),
        binding("/ or m", "edit message filter"),
        binding("x", "clear all filters"),
        Line::from(""),
        section("Paging:"),
        binding("F or Space", "toggle follow (poll for new entries)"),
        binding("< , Left", "older page (stops follow)"),
        binding("> . Right", "newer page (first page resumes follow)"),
        binding("r", "refresh now"),
        Line::from(""),
        section("Other:"),
        binding("? or H", "toggle this help"),
        binding("q", "quit (asks to confirm)"),
        binding("Ctrl-C", "quit immediately"),
    ]
}
