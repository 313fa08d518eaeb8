//! Terminal User Interface for raftview.
//!
//! Shows the stat table and the entry list side by side, with a filter
//! toolbar on top.

mod app;
mod event;
mod input;
mod render;
pub mod state;
mod style;
mod widgets;

pub use app::{App, Controller};
pub use state::AppState;
