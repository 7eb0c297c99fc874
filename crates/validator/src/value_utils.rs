//! Utility functions for judging and converting `serde_json::Value`

use serde_json::{Number, Value};

pub use sift_notation::value_type_name;

/// 2^63, the first float past the i64 range
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Extract i64 from Number, accepting floats without a fractional part.
///
/// Values outside the i64 range (large u64s included) yield `None`.
#[inline]
pub fn number_as_i64(num: &Number) -> Option<i64> {
    num.as_i64().or_else(|| {
        num.as_f64()
            .filter(|f| f.fract() == 0.0 && (-I64_LIMIT..I64_LIMIT).contains(f))
            .map(|f| f as i64)
    })
}

/// Extract f64 from Number, trying both f64 and i64 representations
#[inline]
pub fn number_as_f64(num: &Number) -> Option<f64> {
    num.as_f64().or_else(|| num.as_i64().map(|i| i as f64))
}

/// Check if a value is empty: `null`, a blank string, or an empty container
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Check if a value is truthy (not null, false, 0, or empty string)
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => number_as_f64(n).is_none_or(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => {
            let s = s.trim().to_lowercase();
            !matches!(s.as_str(), "" | "0" | "false" | "no" | "off")
        }
        Value::Array(arr) => !arr.is_empty(),
        Value::Object(obj) => !obj.is_empty(),
    }
}

/// Strict integer reading: integral numbers and integer strings only
pub fn to_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => number_as_i64(n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Lenient integer cast: leading digits of a string, truncated floats,
/// `1`/`0` for booleans, else `0`
pub fn cast_integer(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => leading_number(s)
            .parse::<f64>()
            .map(|f| f.trunc() as i64)
            .unwrap_or(0),
        Value::Bool(b) => i64::from(*b),
        Value::Null | Value::Array(_) | Value::Object(_) => 0,
    }
}

/// Numeric reading: numbers and numeric strings
pub fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => number_as_f64(n),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Number of elements of a container, or characters of a string
pub fn count(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        Value::String(s) => Some(s.chars().count()),
        _ => None,
    }
}

/// Character length of a scalar's text form
pub fn text_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Number(n) => Some(n.to_string().chars().count()),
        Value::Bool(_) | Value::Null => Some(crate::message::value_repr(value).chars().count()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn leading_number(s: &str) -> &str {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(s.starts_with(['-', '+']));
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    &s[..end]
}
