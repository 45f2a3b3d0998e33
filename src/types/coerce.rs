// src/types/coerce.rs
//! Best-effort conversions from untyped claim values. `None` means the value
//! cannot be read as the requested type.
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Number, Value};

pub fn to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => Some(number_to_int(n)),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

pub fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}

pub fn to_time(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => DateTime::<Utc>::from_timestamp(number_to_int(n), 0),
        Value::String(s) => parse_rfc3339(s),
        _ => None,
    }
}

/// A lone string is a one-element audience. Arrays must hold strings only.
pub fn to_audience(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(vec![s.clone()]),
        Value::Array(items) if !items.is_empty() => items
            .iter()
            .map(|item| item.as_str().map(String::from))
            .collect(),
        _ => None,
    }
}

// Strict RFC 3339: upper-case `T` separator, `Z` or a numeric `+hh:mm` offset.
fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    if s.as_bytes().get(10) != Some(&b'T') || s.ends_with('z') {
        return None;
    }
    if let Some(local) = s.strip_suffix('Z') {
        return NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|t| t.and_utc());
    }
    DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%:z")
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

// Floats and integers beyond i64 are truncated toward zero (saturating).
fn number_to_int(n: &Number) -> i64 {
    match n.as_i64() {
        Some(i) => i,
        None => n.as_f64().map(|f| f.trunc() as i64).unwrap_or_default(),
    }
}
