//! UI-agnostic view models.
//!
//! The stat table and the entry list are built from query results here; the
//! TUI maps them to ratatui widgets for rendering.

pub mod entries;
pub mod navigable;
pub mod stat;

pub use entries::{EntryList, format_timestamp};
pub use navigable::NavigableTable;
pub use stat::{StatRow, StatTable};
