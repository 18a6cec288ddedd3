//! Declarative per-field validation rules.
//!
//! A rule is a pure function from the field's current value to pass/fail
//! with a message. Rules run in declaration order; the first failure wins.

use serde_json::Value;

/// One validation rule. `Err` carries the message shown next to the field;
/// an empty message falls back to [`GENERIC_MESSAGE`].
pub type ValidationRule = Box<dyn Fn(&Value) -> std::result::Result<(), String>>;

/// Message used when a failing rule does not provide one.
pub const GENERIC_MESSAGE: &str = "invalid value";

/// Fails on null, or on an empty/whitespace-only string.
pub fn required(message: impl Into<String>) -> ValidationRule {
    let message = message.into();
    Box::new(move |value| match value {
        Value::Null => Err(message.clone()),
        Value::String(text) if text.trim().is_empty() => Err(message.clone()),
        _ => Ok(()),
    })
}

/// Fails when a string value is shorter than `min` characters.
/// Non-string values pass; combine with [`required`] as needed.
pub fn min_len(min: usize, message: impl Into<String>) -> ValidationRule {
    let message = message.into();
    Box::new(move |value| match value.as_str() {
        Some(text) if text.chars().count() < min => Err(message.clone()),
        _ => Ok(()),
    })
}

/// Fails when a string value is longer than `max` characters.
pub fn max_len(max: usize, message: impl Into<String>) -> ValidationRule {
    let message = message.into();
    Box::new(move |value| match value.as_str() {
        Some(text) if text.chars().count() > max => Err(message.clone()),
        _ => Ok(()),
    })
}

/// Fails when the value is not a JSON number.
pub fn is_number(message: impl Into<String>) -> ValidationRule {
    let message = message.into();
    Box::new(move |value| match value {
        Value::Null | Value::Number(_) => Ok(()),
        _ => Err(message.clone()),
    })
}

/// Fails when a numeric value is below `min`. Non-numbers pass.
pub fn min_value(min: f64, message: impl Into<String>) -> ValidationRule {
    let message = message.into();
    Box::new(move |value| match value.as_f64() {
        Some(number) if number < min => Err(message.clone()),
        _ => Ok(()),
    })
}

/// Fails when a numeric value is above `max`. Non-numbers pass.
pub fn max_value(max: f64, message: impl Into<String>) -> ValidationRule {
    let message = message.into();
    Box::new(move |value| match value.as_f64() {
        Some(number) if number > max => Err(message.clone()),
        _ => Ok(()),
    })
}
