//! Lenient number parsing for loosely-typed request bodies.
//!
//! Clients send prices and counters either as JSON numbers or as strings with
//! trailing junk (`"12.50 USD"`). Both helpers read the longest numeric prefix
//! after leading whitespace and ignore the rest.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

#[allow(clippy::unwrap_used)]
static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap()
});

#[allow(clippy::unwrap_used)]
static INT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+").unwrap());

/// Float value of a JSON number, or of the leading decimal literal of a string.
///
/// Returns `None` where no number can be read (`null`, booleans, containers,
/// strings without a numeric prefix).
pub fn leading_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let literal = FLOAT_PREFIX.find(s.trim_start())?.as_str();
            match literal.trim_start_matches(['+', '-']) {
                "Infinity" if literal.starts_with('-') => Some(f64::NEG_INFINITY),
                "Infinity" => Some(f64::INFINITY),
                _ => literal.parse().ok(),
            }
        }
        _ => None,
    }
}

/// Integer value of a JSON number (truncated toward zero), or of the leading
/// run of decimal digits of a string.
pub fn leading_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i),
            None => n
                .as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64),
        },
        Value::String(s) => INT_PREFIX.find(s.trim_start())?.as_str().parse().ok(),
        _ => None,
    }
}
