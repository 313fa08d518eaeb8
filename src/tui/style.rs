//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Color palette.
pub struct Theme;

impl Theme {
    // Background colors
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const SELECTED_BG: Color = Color::DarkGray;

    // Foreground colors
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    // Highlight colors
    pub const HIGHLIGHT_WARN: Color = Color::Yellow;
    pub const HIGHLIGHT_CRITICAL: Color = Color::Red;
    pub const FOLLOW: Color = Color::Green;

    // Panel borders
    pub const BORDER_FOCUSED: Color = Color::Cyan;
    pub const BORDER: Color = Color::DarkGray;

    // Stat rows
    pub const TOTAL_COLOR: Color = Color::Cyan;
    pub const GROUP_COLOR: Color = Color::Yellow;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row style.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Warning style (yellow).
    pub fn warning() -> Style {
        Style::default().fg(Theme::HIGHLIGHT_WARN)
    }

    /// Critical value style (red).
    pub fn critical() -> Style {
        Style::default()
            .fg(Theme::HIGHLIGHT_CRITICAL)
            .add_modifier(Modifier::BOLD)
    }

    /// Follow mode badge.
    pub fn follow() -> Style {
        Style::default()
            .fg(Theme::FOLLOW)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Panel border, highlighted when the panel has focus.
    pub fn border(focused: bool) -> Style {
        if focused {
            Style::default().fg(Theme::BORDER_FOCUSED)
        } else {
            Style::default().fg(Theme::BORDER)
        }
    }

    /// The "*-*" row.
    pub fn stat_total() -> Style {
        Style::default()
            .fg(Theme::TOTAL_COLOR)
            .add_modifier(Modifier::BOLD)
    }

    /// "group-*" rows.
    pub fn stat_group() -> Style {
        Style::default().fg(Theme::GROUP_COLOR)
    }

    /// Active filter value in the toolbar.
    pub fn filter_input() -> Style {
        Style::default()
            .fg(Theme::FG)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Help text style.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Help key style (highlighted keys in help line).
    pub fn help_key() -> Style {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }
}
