//! Coercion helpers for schema-less property values.
//!
//! Every grouping and formatting path goes through [`canonical`], so a value has
//! exactly one textual form no matter which export renders it.

use crate::error::ValueError;
use serde_json::Value;

/// Canonical string form of a property value.
///
/// * strings are returned as-is
/// * numbers use their JSON text (`2020` -> `"2020"`, `2020.5` -> `"2020.5"`)
/// * booleans become `"true"` / `"false"`
/// * arrays and objects are rendered as compact JSON
/// * `null` is treated as absent and yields `None`
#[must_use]
pub fn canonical(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Read a value as a finite `f64`. Numeric strings are accepted after trimming.
///
/// # Errors
/// Returns [`ValueError::NotNumeric`] for anything else, including `NaN`/`inf`.
pub fn parse_number(value: &Value) -> Result<f64, ValueError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ValueError::NotNumeric {
            found: canonical(value).unwrap_or_default(),
        }),
    }
}

/// Read a value as an integer. Fractional numbers are rejected.
///
/// # Errors
/// Returns [`ValueError::NotInteger`] when the value is not an integer literal.
pub fn parse_integer(value: &Value) -> Result<i64, ValueError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ValueError::NotInteger {
        found: canonical(value).unwrap_or_default(),
    })
}

/// Numeric value of an optional property, or `0.0` when absent or not numeric.
#[must_use]
pub fn number_or_zero(value: Option<&Value>) -> f64 {
    value.and_then(|v| parse_number(v).ok()).unwrap_or(0.0)
}

/// Format `n` with `decimals` fraction digits and `,` thousands separators.
///
/// ```
/// use parcelbeam::values::with_thousands;
/// assert_eq!(with_thousands(1234567.891, 2), "1,234,567.89");
/// assert_eq!(with_thousands(-950.0, 0), "-950");
/// ```
#[must_use]
pub fn with_thousands(n: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = formatted.bytes().all(|b| b == b'0' || b == b'.');
    if n.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

/// Integer count with `,` thousands separators.
#[must_use]
pub fn count_with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
