//! File size normalization.
//!
//! Object metadata sometimes carries sizes pre-formatted for display
//! (`"1.06 MB"`). These helpers turn such values back into byte counts and
//! never fail: anything unparseable is 0.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static SIZE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9.]+)\s*(MB|KB|B)").expect("valid size pattern"));

const KB: f64 = 1024.0;

/// Normalize a size value from JSON metadata to bytes.
///
/// Numbers pass through truncated toward zero, sign included. Booleans
/// count as 1 and 0. Strings go through [`parse_size_str`]. Every other
/// JSON type is 0.
///
/// # Example
/// ```
/// use aspect_analyzer::parse_file_size;
/// use serde_json::json;
///
/// assert_eq!(parse_file_size(&json!(2048.9)), 2048);
/// assert_eq!(parse_file_size(&json!("500 KB")), 512_000);
/// assert_eq!(parse_file_size(&json!(-5)), -5);
/// assert_eq!(parse_file_size(&json!(null)), 0);
/// ```
pub fn parse_file_size(input: &Value) -> i64 {
    match input {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(truncate))
            .unwrap_or(0),
        Value::Bool(b) => i64::from(*b),
        Value::String(s) => parse_size_str(s),
        _ => 0,
    }
}

/// Parse a size string such as `"1.06 MB"`, `"500kb"` or `"2048"`.
///
/// The first `<number><optional space><unit>` occurrence wins, with `unit`
/// one of `B`, `KB`, `MB` in any case. Without a unit the whole string must
/// be a number, and may be negative.
pub fn parse_size_str(input: &str) -> i64 {
    if let Some(captures) = SIZE_PATTERN.captures(input) {
        let Ok(value) = captures[1].parse::<f64>() else {
            return 0;
        };
        let bytes = match captures[2].to_ascii_uppercase().as_str() {
            "MB" => value * KB * KB,
            "KB" => value * KB,
            _ => value,
        };
        return truncate(bytes);
    }

    input.trim().parse::<f64>().map(truncate).unwrap_or(0)
}

fn truncate(value: f64) -> i64 {
    if value.is_finite() {
        // `as` truncates toward zero and saturates at the type bounds
        value as i64
    } else {
        0
    }
}
