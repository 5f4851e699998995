//! Timestamp parsing and calendar-day helpers
//!
//! Clients send RFC 3339 timestamps, `datetime-local` form values
//! (`2025-03-14T09:30`) or bare dates (`2025-03-14`). Values without an offset
//! are read in the configured local offset.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::errors::{SharedError, SharedResult};

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Which end of the day a bare date resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBound {
    Start,
    End,
}

/// Parse a client-supplied timestamp
pub fn parse_timestamp(input: &str, offset: FixedOffset, bound: DayBound) -> SharedResult<DateTime<Utc>> {
    let trimmed = input.trim();
    let invalid = || SharedError::InvalidTimestamp { input: input.to_string() };

    if trimmed.is_empty() {
        return Err(invalid());
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return local_to_utc(naive, offset).ok_or_else(invalid);
        }
    }

    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())?;
    let naive = match bound {
        DayBound::Start => date.and_hms_opt(0, 0, 0),
        DayBound::End => date.and_hms_nano_opt(23, 59, 59, 999_999_999),
    }
    .ok_or_else(invalid)?;

    local_to_utc(naive, offset).ok_or_else(invalid)
}

/// Calendar date of a timestamp as seen in the given offset
pub fn calendar_date(timestamp: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    timestamp.with_timezone(&offset).date_naive()
}

/// Format a timestamp as `yyyy-MM-dd` in the given offset
pub fn format_day(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    calendar_date(timestamp, offset).format("%Y-%m-%d").to_string()
}

/// Build a fixed offset from whole minutes east of UTC
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

fn local_to_utc(naive: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    offset.from_local_datetime(&naive).single().map(|local| local.with_timezone(&Utc))
}
