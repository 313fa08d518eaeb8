//! TUI widgets.

mod entry_panel;
mod filter_edit;
mod header;
mod help;
mod quit_confirm;
mod stat_panel;
mod toolbar;

pub use entry_panel::render_entries;
pub use filter_edit::render_filter_edit;
pub use header::render_header;
pub use help::render_help;
pub use quit_confirm::render_quit_confirm;
pub use stat_panel::render_stats;
pub use toolbar::render_toolbar;
