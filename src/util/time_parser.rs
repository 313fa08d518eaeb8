//! Flexible time parser for filter input and CLI arguments.
//!
//! Supports multiple formats:
//! - `now`
//! - ISO 8601: `2026-02-07T17:00:00` (RFC 3339 offsets accepted)
//! - Unix timestamp: `1738944000`
//! - Relative: `-1h`, `-30m`, `-2d`, `-1w`
//! - Date+time (UTC): `2026-02-07 07:00`, `2026-02-07:07:00` or with seconds
//! - Date only (UTC midnight): `2026-02-07`
//! - Time only (base day, UTC): `07:00`

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Error type for time parsing failures.
#[derive(Debug, Clone)]
pub struct TimeParseError {
    pub input: String,
    pub message: String,
}

impl std::fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse time '{}': {}", self.input, self.message)
    }
}

impl std::error::Error for TimeParseError {}

/// Parses a time expression relative to the current time.
///
/// # Examples
///
/// ```
/// use raftview::util::parse_time;
///
/// // Relative time
/// let ts = parse_time("-1h").unwrap();
///
/// // Time only (today)
/// let ts = parse_time("07:00").unwrap();
/// ```
pub fn parse_time(input: &str) -> Result<DateTime<Utc>, TimeParseError> {
    parse_time_with_base(input, Utc::now())
}

/// Parses a time expression in UTC using `base` as a reference.
///
/// | Format | Example | Description |
/// |--------|---------|-------------|
/// | Now | `now` | `base` itself |
/// | ISO 8601 | `2026-02-07T17:00:00` | Full datetime |
/// | Unix timestamp | `1738944000` | Seconds since epoch |
/// | Relative | `-1h`, `-30m`, `-2d` | Relative to `base` |
/// | Date+time | `2026-02-07 07:00` | UTC, space or colon separator |
/// | Date | `2026-02-07` | UTC midnight |
/// | Time only | `07:00` | On the day of `base`, UTC |
pub fn parse_time_with_base(
    input: &str,
    base: DateTime<Utc>,
) -> Result<DateTime<Utc>, TimeParseError> {
    let input = input.trim();
    let error = |message: &str| TimeParseError {
        input: input.to_string(),
        message: message.to_string(),
    };

    if input.eq_ignore_ascii_case("now") {
        return Ok(base);
    }

    if let Some(secs) = try_parse_unix_timestamp(input) {
        return Utc
            .timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| error("Unix timestamp out of range"));
    }

    if let Some(delta_secs) = try_parse_relative_delta_seconds(input) {
        return base
            .timestamp()
            .checked_add(delta_secs)
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .ok_or_else(|| error("Relative time overflow"));
    }

    if let Some(ts) = try_parse_iso8601(input) {
        return Ok(ts);
    }

    if let Some(ts) = try_parse_date_time(input) {
        return Ok(ts);
    }

    if let Some(ts) = try_parse_date_only(input) {
        return Ok(ts);
    }

    if let Some(ts) = try_parse_time_only_on_base_date(input, base) {
        return Ok(ts);
    }

    Err(error(
        "Unrecognized format. Use: ISO 8601 (2026-02-07T17:00:00), \
         Unix timestamp (1738944000), relative (-1h, -30m, -2d), \
         date time (2026-02-07 07:00), date (2026-02-07), or time only (07:00)",
    ))
}

/// Try to parse as Unix timestamp (plain integer).
fn try_parse_unix_timestamp(input: &str) -> Option<i64> {
    if input.chars().all(|c| c.is_ascii_digit()) && !input.is_empty() {
        input.parse::<i64>().ok()
    } else {
        None
    }
}

/// Parses relative expression and returns delta seconds (negative value).
fn try_parse_relative_delta_seconds(input: &str) -> Option<i64> {
    let rest = input.strip_prefix('-')?;
    let unit = rest.chars().last()?;
    let number_str = &rest[..rest.len() - unit.len_utf8()];
    if number_str.is_empty() {
        return None;
    }
    let number: i64 = number_str.parse().ok()?;

    let seconds = match unit {
        's' => number,
        'm' => number.checked_mul(60)?,
        'h' => number.checked_mul(3600)?,
        'd' => number.checked_mul(86400)?,
        'w' => number.checked_mul(604800)?,
        _ => return None,
    };

    seconds.checked_neg()
}

/// Try to parse as ISO 8601 datetime.
fn try_parse_iso8601(input: &str) -> Option<DateTime<Utc>> {
    if !input.contains('T') {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

/// Try to parse as `YYYY-MM-DD HH:MM[:SS]` or `YYYY-MM-DD:HH:MM[:SS]`.
fn try_parse_date_time(input: &str) -> Option<DateTime<Utc>> {
    if input.len() < 11 || !input.is_char_boundary(10) {
        return None;
    }

    let (date_part, rest) = input.split_at(10);
    let time_part = rest.strip_prefix(':').or_else(|| rest.strip_prefix(' '))?;

    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    let time = match time_part.len() {
        5 => NaiveTime::parse_from_str(time_part, "%H:%M").ok()?,
        8 => NaiveTime::parse_from_str(time_part, "%H:%M:%S").ok()?,
        _ => return None,
    };

    Some(Utc.from_utc_datetime(&NaiveDateTime::new(date, time)))
}

/// Try to parse as a bare date (UTC midnight).
fn try_parse_date_only(input: &str) -> Option<DateTime<Utc>> {
    if input.len() != 10 {
        return None;
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    let midnight = NaiveTime::from_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&date.and_time(midnight)))
}

fn try_parse_time_only_on_base_date(input: &str, base: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if input.len() != 5 || input.chars().nth(2) != Some(':') {
        return None;
    }

    let time = NaiveTime::parse_from_str(input, "%H:%M").ok()?;
    let datetime = NaiveDateTime::new(base.date_naive(), time);
    Some(Utc.from_utc_datetime(&datetime))
}
