//! Forgiving parameter lookup for effect configuration.
//!
//! Effect params arrive as a JSON object (CLI `--params`, a `data-fx-params`
//! attribute on the anchor element). A missing key or a value of the wrong
//! type silently falls back to the default: a typo in page markup should
//! never stop an effect from running.

use serde_json::Value;

/// `params[name]` as `f64` (integers accepted), or `default`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// `params[name]` as `f64` clamped to `[min, max]`, or `default`.
pub fn param_f64_in(params: &Value, name: &str, default: f64, min: f64, max: f64) -> f64 {
    param_f64(params, name, default).clamp(min, max)
}

/// `params[name]` as a non-negative integer, or `default`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// `params[name]` as `bool`, or `default`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// `params[name]` as an owned string, or `default`.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// `params[name]` as a list of strings. Non-string entries are skipped; a
/// missing key or non-array value yields `default`.
pub fn param_strings(params: &Value, name: &str, default: &[&str]) -> Vec<String> {
    match params.get(name).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        None => default.iter().map(|s| (*s).to_owned()).collect(),
    }
}
