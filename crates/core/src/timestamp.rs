//! ISO-8601 timestamp codec for entity records.
//!
//! Records carry `created_at`/`updated_at` as naive ISO-8601 strings with
//! microsecond precision (`2017-09-28T21:05:54.119427`), interpreted as UTC.
//! Parsing is more lenient: RFC 3339 strings with an offset are normalized to
//! UTC, and the fractional part or the whole time component may be omitted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, TimeZone, Utc};

use crate::error::{ParseError, ParseResult};

/// Timestamp type used by every entity.
pub type Timestamp = DateTime<Utc>;

const RECORD_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current time, truncated to the precision a record can hold.
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// Render a timestamp the way records store it.
pub fn format(ts: &Timestamp) -> String {
    ts.format(RECORD_FORMAT).to_string()
}

/// Parse a record timestamp. `field` is only used for error reporting.
pub fn parse(field: &str, text: &str) -> ParseResult<Timestamp> {
    let invalid = |reason: String| ParseError::InvalidTimestamp {
        field: field.to_string(),
        value: text.to_string(),
        reason,
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc).trunc_subsecs(6));
    }

    match NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => Ok(Utc.from_utc_datetime(&naive).trunc_subsecs(6)),
        Err(datetime_err) => {
            let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map_err(|_| invalid(datetime_err.to_string()))?;
            let midnight = date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| invalid("date out of range".to_string()))?;
            Ok(Utc.from_utc_datetime(&midnight))
        }
    }
}
