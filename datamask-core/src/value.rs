//! value.rs - The generic value tree walked by the masking engines.
//!
//! `Value` is a closed sum type covering every shape the masker knows how to
//! traverse. Anything that is not text or a container is carried as an
//! `Opaque` scalar and passed through untouched.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A mapping from string keys to generic values.
pub type Map = HashMap<String, Value>;

/// A leaf value the masker never inspects.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
}

/// Arbitrary nested data as seen by the masker.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text. The only variant whose content can change when masked.
    String(String),
    /// An ordered list of values.
    Sequence(Vec<Value>),
    /// A mapping with string keys.
    Map(Map),
    /// A mapping whose keys may be of any type. Stored as ordered pairs so
    /// keys need neither `Hash` nor `Eq`; the masker copies them verbatim.
    AnyMap(Vec<(Value, Value)>),
    /// An ordered list of string-keyed mappings.
    MapSequence(Vec<Map>),
    /// Numbers, booleans, null.
    Opaque(Scalar),
}

impl Value {
    pub const NULL: Value = Value::Opaque(Scalar::Null);

    /// A short name for the variant, used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Map(_) => "map",
            Value::AnyMap(_) => "any-map",
            Value::MapSequence(_) => "map-sequence",
            Value::Opaque(Scalar::Null) => "null",
            Value::Opaque(_) => "scalar",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Opaque(Scalar::Null))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map_sequence(&self) -> Option<&[Map]> {
        match self {
            Value::MapSequence(maps) => Some(maps),
            _ => None,
        }
    }

    pub fn as_any_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::AnyMap(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Looks up a string key in a `Map`, or a `Value::String` key in an `AnyMap`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(m) => m.get(key),
            Value::AnyMap(pairs) => pairs
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Looks up a key of any type in an `AnyMap`.
    pub fn get_any(&self, key: &Value) -> Option<&Value> {
        self.as_any_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Opaque(Scalar::Bool(b))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Opaque(Scalar::Int(n.into()))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Opaque(Scalar::Int(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Opaque(Scalar::UInt(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Opaque(Scalar::Float(n))
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Opaque(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl From<Vec<Map>> for Value {
    fn from(maps: Vec<Map>) -> Self {
        Value::MapSequence(maps)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(pairs: Vec<(Value, Value)>) -> Self {
        Value::AnyMap(pairs)
    }
}

fn scalar_from_number(n: &serde_json::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Int(i)
    } else if let Some(u) = n.as_u64() {
        Scalar::UInt(u)
    } else {
        n.as_f64().map_or(Scalar::Null, Scalar::Float)
    }
}

/// JSON objects become `Map`s and arrays become `Sequence`s.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::NULL,
            serde_json::Value::Bool(b) => Value::from(b),
            serde_json::Value::Number(n) => Value::Opaque(scalar_from_number(&n)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Map(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Int(n) => serializer.serialize_i64(*n),
            Scalar::UInt(n) => serializer.serialize_u64(*n),
            Scalar::Float(n) => serializer.serialize_f64(*n),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(m) => m.serialize(serializer),
            Value::AnyMap(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (k, v) in pairs {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::MapSequence(maps) => maps.serialize(serializer),
            Value::Opaque(scalar) => scalar.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_maps_objects_and_arrays() {
        let value = Value::from(json!({
            "name": "Jane",
            "tags": ["a", 1, null],
            "amount": 150.75,
            "big": u64::MAX,
        }));

        assert_eq!(value.get("name").and_then(Value::as_str), Some("Jane"));
        let tags = value.get("tags").and_then(Value::as_sequence).unwrap();
        assert_eq!(tags, &[Value::from("a"), Value::from(1), Value::NULL]);
        assert_eq!(value.get("amount"), Some(&Value::from(150.75)));
        assert_eq!(value.get("big"), Some(&Value::from(u64::MAX)));
    }

    #[test]
    fn test_any_map_lookup_by_key_type() {
        let value = Value::AnyMap(vec![
            (Value::from("card"), Value::from("x")),
            (Value::from(123), Value::from("number key")),
            (Value::from(true), Value::from("bool key")),
        ]);

        assert_eq!(value.get("card"), Some(&Value::from("x")));
        assert_eq!(value.get_any(&Value::from(123)), Some(&Value::from("number key")));
        assert_eq!(value.get_any(&Value::from(true)), Some(&Value::from("bool key")));
        assert_eq!(value.get_any(&Value::from(false)), None);
    }

    #[test]
    fn test_serialize_to_json() {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::from(7));
        let value = Value::Sequence(vec![
            Value::Map(map),
            Value::AnyMap(vec![(Value::from(42), Value::from("answer"))]),
            Value::NULL,
        ]);

        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, json!([{"id": 7}, {"42": "answer"}, null]));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::NULL.kind(), "null");
        assert_eq!(Value::from(1.5).kind(), "scalar");
        assert_eq!(Value::MapSequence(vec![]).kind(), "map-sequence");
        assert!(Value::NULL.is_null());
    }
}
