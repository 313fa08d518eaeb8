//! Log server client abstraction.
//!
//! The TUI talks to the log server through the [`LogSource`] trait so the
//! request worker can be driven by the real HTTP client or a test double.

mod http;

pub use http::HttpLogSource;

use thiserror::Error;

use crate::api::{LogEntry, QueryRequest, StatMap};

/// Errors that can occur while querying the log server.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("server error: {0}")]
    Server(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("invalid server URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// Source of stat and list query results.
pub trait LogSource: Send {
    /// Issues a stat query, returning counts grouped by the two dimensions.
    fn stat(&self, query: &QueryRequest) -> Result<StatMap, ClientError>;

    /// Issues a list query, returning entries newest first.
    fn list(&self, query: &QueryRequest) -> Result<Vec<LogEntry>, ClientError>;

    /// Human-readable description of the source (shown in the header).
    fn describe(&self) -> String;
}
