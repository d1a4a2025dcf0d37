use chrono::{SecondsFormat, TimeZone, Utc};
use serde_json::{Number, Value};

/// Timestamps below this magnitude are seconds, above it milliseconds.
const MILLIS_THRESHOLD: f64 = 1e12;

/// Coerce a JSON value to a finite number.
///
/// Accepts numbers and numeric strings. Presence decides, not truthiness: a
/// stored `0` comes back as `0` instead of disappearing. Integral floats
/// collapse back to integers so counters render as `3`, never `3.0`.
/// Anything non-numeric or non-finite yields `None`.
pub fn to_number(value: &Value) -> Option<Number> {
    if let Value::Number(n) = value {
        if n.is_i64() || n.is_u64() {
            return Some(n.clone());
        }
    }
    number_from_f64(to_f64(value)?)
}

/// Finite `f64` view of a JSON number or numeric string.
pub fn to_f64(value: &Value) -> Option<f64> {
    let num = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    num.is_finite().then_some(num)
}

/// Build a JSON number from a finite float, preferring the integer form.
pub(crate) fn number_from_f64(num: f64) -> Option<Number> {
    if num.fract() == 0.0 && num.abs() < i64::MAX as f64 {
        Some(Number::from(num as i64))
    } else {
        Number::from_f64(num)
    }
}

/// Convert a UNIX timestamp into an ISO-8601 string.
///
/// Accepts a numeric or numeric-string value; magnitudes below 10^12 are
/// seconds and get scaled to milliseconds, larger ones are already
/// milliseconds. Missing, non-numeric, and out-of-range inputs yield `None`.
pub fn unix_timestamp_to_iso(value: &Value) -> Option<String> {
    let num = to_f64(value)?;
    let millis = if num.abs() < MILLIS_THRESHOLD {
        num * 1000.0
    } else {
        num
    };

    let timestamp = Utc.timestamp_millis_opt(millis as i64).single()?;
    Some(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}
