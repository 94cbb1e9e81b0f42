//! Conversions between the engine's value variants.
//!
//! Every conversion here is total: failures surface as sentinel values (`NaN`, `false`,
//! `None`) so the calling expression decides what a failed conversion means.

pub mod datetime;

use std::cmp::Ordering;

use crate::value::Value;

pub use datetime::to_date;

/// Integer returned by [`to_integer`] for non-numeric input.
pub const NOT_AN_INTEGER: i64 = i64::MAX;

/// Numeric pass-through; every other variant is `NaN`.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        Value::Text(_) | Value::Bool(_) | Value::Date(_) => f64::NAN,
    }
}

/// Truncating integer conversion; non-numeric (and NaN) input yields [`NOT_AN_INTEGER`].
pub fn to_integer(value: &Value) -> i64 {
    match value {
        Value::Number(n) if !n.is_nan() => *n as i64,
        _ => NOT_AN_INTEGER,
    }
}

/// Boolean pass-through; every other variant is `false`.
pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(_) | Value::Text(_) | Value::Date(_) => false,
    }
}

/// Textual form of any value.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Compare two values.
///
/// Returns `-1`, `0` or `1` for two numbers or two values of the same comparable variant, and
/// `NaN` when the pair cannot be ordered (mixed variants, or a NaN number). `NaN` must be
/// read as "incomparable", never as "equal".
pub fn compare(left: &Value, right: &Value) -> f64 {
    let ord = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
        _ => None,
    };
    match ord {
        Some(Ordering::Less) => -1.0,
        Some(Ordering::Equal) => 0.0,
        Some(Ordering::Greater) => 1.0,
        None => f64::NAN,
    }
}
