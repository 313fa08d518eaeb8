//! Wire types for the log server's JSON query API.
//!
//! Both endpoints (`api/stat` and `api/list`) take the same [`QueryRequest`]
//! body. Field names on the wire are PascalCase and absent filters are omitted.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Stat row value meaning "any value of this dimension".
pub const WILDCARD: &str = "*";

/// Counts grouped by primary then secondary dimension value.
pub type StatMap = BTreeMap<String, BTreeMap<String, u64>>;

/// The pair of dimensions used for grouping and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DimensionSet {
    /// Application, then process.
    #[default]
    ApplicationProcess,
    /// Hostname, then application.
    HostnameApplication,
}

impl DimensionSet {
    /// Column title of the primary dimension.
    pub fn primary_name(&self) -> &'static str {
        match self {
            DimensionSet::ApplicationProcess => "Application",
            DimensionSet::HostnameApplication => "Hostname",
        }
    }

    /// Column title of the secondary dimension.
    pub fn secondary_name(&self) -> &'static str {
        match self {
            DimensionSet::ApplicationProcess => "Process",
            DimensionSet::HostnameApplication => "Application",
        }
    }

    pub fn primary_of<'a>(&self, entry: &'a LogEntry) -> &'a str {
        match self {
            DimensionSet::ApplicationProcess => &entry.application,
            DimensionSet::HostnameApplication => &entry.hostname,
        }
    }

    pub fn secondary_of<'a>(&self, entry: &'a LogEntry) -> &'a str {
        match self {
            DimensionSet::ApplicationProcess => &entry.process,
            DimensionSet::HostnameApplication => &entry.application,
        }
    }

    /// Stores the dimension filters into the matching request fields.
    pub fn apply_filter(
        &self,
        query: &mut QueryRequest,
        primary: Option<String>,
        secondary: Option<String>,
    ) {
        match self {
            DimensionSet::ApplicationProcess => {
                query.application = primary;
                query.process = secondary;
            }
            DimensionSet::HostnameApplication => {
                query.hostname = primary;
                query.application = secondary;
            }
        }
    }

    /// Reads back the dimension filters from a request.
    pub fn filter_of<'a>(&self, query: &'a QueryRequest) -> (Option<&'a str>, Option<&'a str>) {
        match self {
            DimensionSet::ApplicationProcess => {
                (query.application.as_deref(), query.process.as_deref())
            }
            DimensionSet::HostnameApplication => {
                (query.hostname.as_deref(), query.application.as_deref())
            }
        }
    }
}

impl fmt::Display for DimensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionSet::ApplicationProcess => write!(f, "app-process"),
            DimensionSet::HostnameApplication => write!(f, "host-app"),
        }
    }
}

impl FromStr for DimensionSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "app-process" | "application-process" => Ok(DimensionSet::ApplicationProcess),
            "host-app" | "hostname-application" => Ok(DimensionSet::HostnameApplication),
            other => Err(format!(
                "unknown dimension set '{other}' (expected app-process or host-app)"
            )),
        }
    }
}

/// Request body shared by `api/stat` and `api/list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryRequest {
    pub limit: u32,
    /// Only sent by list queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process: Option<String>,
}

/// Response of `api/stat`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StatResponse {
    pub stat: Option<StatMap>,
    pub error: Option<String>,
}

/// Response of `api/list`. Entries arrive newest first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListResponse {
    pub entries: Option<Vec<LogEntry>>,
    pub error: Option<String>,
}

/// Responses that may carry a server-side error message.
pub trait ServerReply {
    fn server_error(&self) -> Option<&str>;
}

impl ServerReply for StatResponse {
    fn server_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

impl ServerReply for ListResponse {
    fn server_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// A single log line as returned by `api/list`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogEntry {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub application: String,
    #[serde(default)]
    pub process: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
}

/// Accepts epoch milliseconds or an RFC 3339 string.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
        RawTimestamp::FractionalMillis(ms) => Utc
            .timestamp_millis_opt(ms as i64)
            .single()
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
        RawTimestamp::Text(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| D::Error::custom(format!("invalid timestamp '{s}': {e}"))),
    }
}
