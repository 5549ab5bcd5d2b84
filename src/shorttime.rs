// Copyright 2025 Martin Pool

//! Concise human-readable rendering of event times.

use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

fn zoned(timestamp_ms: i64, tz: &TimeZone) -> Option<Zoned> {
    Timestamp::from_millisecond(timestamp_ms)
        .ok()
        .map(|t| t.to_zoned(tz.clone()))
}

/// Describe how long ago `timestamp_ms` was, like "5m ago".
///
/// Anything a week or older is shown as an absolute time instead.
pub fn relative(timestamp_ms: i64, now: Timestamp, tz: &TimeZone) -> String {
    let age = now.as_millisecond().saturating_sub(timestamp_ms);
    let minutes = age.div_euclid(MINUTE_MS);
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if age < DAY_MS {
        format!("{}h ago", age / HOUR_MS)
    } else if age < 7 * DAY_MS {
        format!("{}d ago", age / DAY_MS)
    } else {
        absolute(timestamp_ms, tz)
    }
}

/// Render a time like "16th Jan 2025, 10:30 AM UTC".
pub fn absolute(timestamp_ms: i64, tz: &TimeZone) -> String {
    let Some(zoned) = zoned(timestamp_ms, tz) else {
        return timestamp_ms.to_string();
    };
    let day = zoned.day();
    format!(
        "{day}{suffix} {rest}",
        suffix = ordinal_suffix(day),
        rest = zoned.strftime("%b %Y, %-I:%M %p %Z"),
    )
}

/// Render the time of day of an event, like "9:05:07 PM".
pub fn clock(timestamp_ms: i64, tz: &TimeZone) -> String {
    match zoned(timestamp_ms, tz) {
        Some(zoned) => zoned.strftime("%-I:%M:%S %p").to_string(),
        None => timestamp_ms.to_string(),
    }
}

/// Render a time in RFC 3339 form, for machine-readable output.
pub fn rfc3339(timestamp_ms: i64) -> String {
    match Timestamp::from_millisecond(timestamp_ms) {
        Ok(t) => t.to_string(),
        Err(_) => timestamp_ms.to_string(),
    }
}

/// English ordinal suffix for a day of the month.
pub fn ordinal_suffix(day: i8) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
