use std::fmt::{Display, Write};

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// en-US short date, e.g. `Jan 5, 2025`
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Naive layouts the server has been seen to emit, tried in order
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a server timestamp into a UTC-normalised naive datetime.
///
/// Accepts RFC 3339 (offset is folded into UTC), naive ISO datetimes, and bare
/// dates (midnight). Returns None for anything else.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a server timestamp for display with the default format
pub fn format_date(raw: Option<&str>) -> String {
    format_date_with(raw, DEFAULT_DATE_FORMAT)
}

/// Format a server timestamp for display.
///
/// Missing input gives an empty string; unparseable input is echoed back.
pub fn format_date_with(raw: Option<&str>, fmt: &str) -> String {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return String::new();
    };
    // Offset timestamps display in their own calendar day
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw.trim()) {
        return render(dt.format(fmt), raw);
    }
    match parse_timestamp(raw) {
        Some(dt) => render(dt.format(fmt), raw),
        None => raw.to_string(),
    }
}

/// A bad format string makes chrono's Display fail; fall back to the raw text
fn render(formatted: impl Display, raw: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", formatted) {
        Ok(()) => out,
        Err(_) => raw.to_string(),
    }
}
