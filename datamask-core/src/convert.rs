//! convert.rs - Flattens typed records into generic string-keyed maps.
//!
//! Conversion goes through `serde_json::Value`, so a record's map keys are
//! its serialized field names (`#[serde(rename)]`, `#[serde(flatten)]` and
//! friends all apply).
//!
//! License: MIT OR APACHE 2.0

use serde::Serialize;

use crate::errors::MaskError;
use crate::value::{Map, Value};

/// Converts any serializable record into a map of its top-level fields.
///
/// Fails if serialization fails or if the record does not serialize to an
/// object (a bare string, number or list has no field names).
pub fn to_generic_map<T>(record: &T) -> Result<Map, MaskError>
where
    T: Serialize + ?Sized,
{
    match serde_json::to_value(record)? {
        serde_json::Value::Object(obj) => Ok(obj
            .into_iter()
            .map(|(key, value)| (key, Value::from(value)))
            .collect()),
        other => Err(MaskError::NotAMap(json_kind(&other))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
