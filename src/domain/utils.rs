//! Field coercion shared by every operation's normalizer
//!
//! Inbound fields arrive as raw JSON. A field is treated as supplied only when it
//! is truthy: not null, `false`, `0` or an empty string. Boolean flags are the
//! exception and count as supplied whenever any value is present.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::ValidationError;

pub const MAX_SIGNATURES_LIMIT: u64 = 1_000;

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Decodes a request body into an operation input. An empty body reads as `{}`.
pub fn parse_input<T: DeserializeOwned>(body: &[u8]) -> Result<T, ValidationError> {
    let value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice::<Value>(body)
            .map_err(|_| ValidationError::invalid_shape("request body must be valid JSON"))?
    };

    if !value.is_object() {
        return Err(ValidationError::invalid_shape(
            "request body must be a JSON object",
        ));
    }

    serde_json::from_value(value).map_err(|err| ValidationError::invalid_shape(err.to_string()))
}

pub fn text(field: &str, value: Option<Value>) -> Result<Option<String>, ValidationError> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Ok(Some(text)),
        Some(other) if is_truthy(&other) => Err(ValidationError::invalid_shape(format!(
            "{field} must be a string"
        ))),
        _ => Ok(None),
    }
}

pub fn required_text(
    field: &str,
    value: Option<Value>,
    missing: &'static str,
) -> Result<String, ValidationError> {
    text(field, value)?.ok_or(ValidationError::MissingParameter(missing))
}

/// Passes any truthy value through untouched.
pub fn opaque(value: Option<Value>) -> Option<Value> {
    value.filter(is_truthy)
}

/// Coerces a JSON number or numeric string into an unsigned integer. Zero is kept.
pub fn number(field: &str, value: Option<Value>) -> Result<Option<u64>, ValidationError> {
    let invalid = || ValidationError::invalid_shape(format!("{field} must be a non-negative integer"));

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => {
            if let Some(n) = number.as_u64() {
                return Ok(Some(n));
            }
            match number.as_f64() {
                Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 => {
                    Ok(Some(n as u64))
                }
                _ => Err(invalid()),
            }
        }
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<u64>().map(Some).map_err(|_| invalid())
        }
        Some(_) => Err(invalid()),
    }
}

/// Like [`number`], but zero counts as not supplied.
pub fn nonzero_number(field: &str, value: Option<Value>) -> Result<Option<u64>, ValidationError> {
    Ok(number(field, value)?.filter(|n| *n != 0))
}

/// Coerces a limit and lowers it to `max`. Anything numeric at or above `max`
/// becomes `max`, whatever its size or precision. Zero counts as not supplied.
pub fn clamped_limit(
    field: &str,
    value: Option<Value>,
    max: u64,
) -> Result<Option<u64>, ValidationError> {
    let invalid = || ValidationError::invalid_shape(format!("{field} must be a non-negative integer"));

    let n = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<f64>().ok()
        }
        Some(_) => None,
    }
    .filter(|n| !n.is_nan() && *n >= 0.0)
    .ok_or_else(invalid)?;

    if n >= max as f64 {
        return Ok(Some(max));
    }
    if n.fract() != 0.0 {
        return Err(invalid());
    }

    Ok(Some(n as u64).filter(|n| *n != 0))
}

pub fn flag(field: &str, value: Option<Value>) -> Result<Option<bool>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(flag)),
        Some(Value::String(text)) => match text.trim() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(ValidationError::invalid_shape(format!(
                "{field} must be a boolean"
            ))),
        },
        Some(_) => Err(ValidationError::invalid_shape(format!(
            "{field} must be a boolean"
        ))),
    }
}

/// Requires a JSON array of non-empty strings.
pub fn id_list(field: &str, value: Option<Value>) -> Result<Vec<String>, ValidationError> {
    let not_array = || ValidationError::invalid_shape(format!("{field} must be an array"));

    let Some(Value::Array(items)) = value else {
        return Err(not_array());
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(id) if !id.is_empty() => Ok(id),
            _ => Err(ValidationError::invalid_shape(format!(
                "{field} must contain only non-empty strings"
            ))),
        })
        .collect()
}
