//! raftview - terminal log browser library.
//!
//! This library provides the pieces used by the `raftview` binary:
//! - `api` - wire types of the log server's `api/stat` and `api/list` endpoints
//! - `client` - the HTTP client behind a `LogSource` trait
//! - `query` - filter state and request shaping
//! - `poller` / `fetcher` - follow-mode polling and the background request worker
//! - `view` - UI-agnostic stat table and entry list models
//! - `tui` - the interactive terminal interface

pub mod api;
pub mod client;
pub mod fetcher;
pub mod poller;
pub mod query;
pub mod tui;
pub mod util;
pub mod view;
