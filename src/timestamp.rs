//! Epoch-millisecond decoding for DATE / TIME / TIMESTAMP columns.
//!
//! The engine ships temporal values as milliseconds since
//! 1970-01-01T00:00:00 (no zone), either as JSON numbers or numeric strings.

use crate::error::{DrillLinkError, Result};
use crate::models::CellValue;
use chrono::{DateTime, NaiveDateTime};

const MICROS_PER_SECOND: i64 = 1_000_000;

/// Decode a raw cell as epoch milliseconds.
///
/// - `Null` and the empty string decode to `Ok(None)`.
/// - Numbers and numeric strings decode to a naive instant, kept to
///   microsecond precision.
/// - Anything unparsable, non-finite, or outside the representable date
///   range is [`DrillLinkError::TimestampOutOfRange`].
///
/// ```rust
/// use drill_link::{timestamp::ms_to_datetime, CellValue};
///
/// let dt = ms_to_datetime(&CellValue::from("1577836800000")).unwrap().unwrap();
/// assert_eq!(dt.to_string(), "2020-01-01 00:00:00");
/// assert_eq!(ms_to_datetime(&CellValue::Null).unwrap(), None);
/// ```
pub fn ms_to_datetime(raw: &CellValue) -> Result<Option<NaiveDateTime>> {
    let millis = match raw {
        CellValue::Null => return Ok(None),
        CellValue::String(s) if s.is_empty() => return Ok(None),
        CellValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| out_of_range(raw))?,
        CellValue::Number(n) => n.as_f64().ok_or_else(|| out_of_range(raw))?,
        CellValue::DateTime(dt) => return Ok(Some(*dt)),
        CellValue::Bool(_) | CellValue::Json(_) => return Err(out_of_range(raw)),
    };

    millis_to_naive(millis)
        .map(Some)
        .ok_or_else(|| out_of_range(raw))
}

/// Decode a cell for column coercion.
///
/// Undecodable input becomes `Null`; the error is handed back for logging.
pub fn decode_cell(raw: &CellValue) -> (CellValue, Option<DrillLinkError>) {
    match ms_to_datetime(raw) {
        Ok(Some(dt)) => (CellValue::DateTime(dt), None),
        Ok(None) => (CellValue::Null, None),
        Err(e) => (CellValue::Null, Some(e)),
    }
}

/// Milliseconds since the epoch for a naive instant (sub-millisecond part truncated).
pub fn datetime_to_ms(dt: &NaiveDateTime) -> i64 {
    dt.and_utc().timestamp_millis()
}

fn millis_to_naive(millis: f64) -> Option<NaiveDateTime> {
    if !millis.is_finite() {
        return None;
    }

    let micros = (millis * 1000.0).round();
    // i64::MAX is not exactly representable; stay strictly inside the range
    if micros.abs() >= 9.2e18 {
        return None;
    }
    let micros = micros as i64;

    let secs = micros.div_euclid(MICROS_PER_SECOND);
    let nanos = (micros.rem_euclid(MICROS_PER_SECOND) * 1000) as u32;
    DateTime::from_timestamp(secs, nanos).map(|dt| dt.naive_utc())
}

fn out_of_range(raw: &CellValue) -> DrillLinkError {
    DrillLinkError::TimestampOutOfRange(raw.to_string())
}
