//! Envelope unwrapping for LibreNMS responses
//!
//! LibreNMS wraps every collection in a named field, e.g.
//! `{"status": "ok", "devices": [...]}`. Services are additionally grouped
//! per host: `{"services": [[...]]}`.

use crate::error::LibreNmsError;
use serde_json::{Map, Value};

/// Take the named array out of a response body
pub fn take_array(mut body: Value, key: &str) -> Result<Vec<Value>, LibreNmsError> {
    match body.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(LibreNmsError::UnexpectedResponse(format!(
            "`{}` is {}, expected an array",
            key,
            type_name(&other)
        ))),
        None => Err(LibreNmsError::NotFound(format!(
            "response has no `{}` field",
            key
        ))),
    }
}

/// Take the named array and convert every element to an object
pub fn take_objects(body: Value, key: &str) -> Result<Vec<Map<String, Value>>, LibreNmsError> {
    take_array(body, key)?
        .into_iter()
        .map(|item| into_object(item, key))
        .collect()
}

/// Take the first object of the named array
///
/// An empty array is `NotFound`; `what` names the resource in the message.
pub fn first_object(body: Value, key: &str, what: &str) -> Result<Map<String, Value>, LibreNmsError> {
    let first = take_array(body, key)?
        .into_iter()
        .next()
        .ok_or_else(|| LibreNmsError::NotFound(format!("{} not found", what)))?;
    into_object(first, key)
}

/// Take the first group of the named array
///
/// The first element is expected to be an array of objects. A flat layout,
/// where the first element is an object, yields a one-element group.
pub fn first_group(body: Value, key: &str, what: &str) -> Result<Vec<Map<String, Value>>, LibreNmsError> {
    let first = take_array(body, key)?
        .into_iter()
        .next()
        .ok_or_else(|| LibreNmsError::NotFound(format!("{} not found", what)))?;

    match first {
        Value::Array(items) => items.into_iter().map(|item| into_object(item, key)).collect(),
        Value::Object(object) => Ok(vec![object]),
        other => Err(LibreNmsError::UnexpectedResponse(format!(
            "`{}` holds {}, expected arrays or objects",
            key,
            type_name(&other)
        ))),
    }
}

fn into_object(value: Value, key: &str) -> Result<Map<String, Value>, LibreNmsError> {
    match value {
        Value::Object(object) => Ok(object),
        other => Err(LibreNmsError::UnexpectedResponse(format!(
            "`{}` holds {}, expected objects",
            key,
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
