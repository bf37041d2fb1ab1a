//! Lenient numeric coercion for inventory exports.
//!
//! The exports mix JSON numbers and numeric strings, and the valuation
//! rules were defined against `parseFloat`/`parseInt` behaviour: a leading
//! numeric prefix is accepted, anything else is NaN. These helpers
//! reproduce that behaviour.

use serde::{Deserialize, Serialize};

/// A field value as received from the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Float value, NaN when no numeric prefix exists.
    pub fn as_float(&self) -> f64 {
        match self {
            RawValue::Number(n) => *n,
            RawValue::Text(t) => parse_float(t),
        }
    }

    /// Truncated integer value, `None` where `parseInt` would give NaN.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            RawValue::Number(_) => None,
            RawValue::Text(t) => parse_int(t),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(t) => t.clone(),
        }
    }

    /// True for an empty or whitespace-only string.
    pub fn is_blank(&self) -> bool {
        matches!(self, RawValue::Text(t) if t.trim().is_empty())
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

/// Parse the longest decimal prefix of `s`.
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fraction, an optional exponent, or `Infinity`. Returns NaN when
/// no digits are found.
pub fn parse_float(s: &str) -> f64 {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let negative = bytes.first() == Some(&b'-');
    let mut end = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));

    if t[end..].starts_with("Infinity") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    t[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse the leading base-10 integer of `s`, truncating any fraction.
///
/// Returns `None` when there are no leading digits or the value overflows.
pub fn parse_int(s: &str) -> Option<i64> {
    let t = s.trim_start();
    let (negative, rest) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let value: i64 = rest[..len].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Integer part of a float for summation, with NaN and infinities as zero.
pub fn truncate_or_zero(value: f64) -> i64 {
    if value.is_finite() {
        value.trunc() as i64
    } else {
        0
    }
}

/// `value`, or zero when it is NaN.
pub fn or_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}
