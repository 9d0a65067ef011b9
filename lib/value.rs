//! Dynamic value tree shared by server descriptors, adapter templates and
//! generated documents.
//!
//! Every mapping is a `BTreeMap`, so anything rendered from a [`Value`] has
//! its keys sorted at every level.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

/// Key-sorted mapping from string keys to values.
pub type Mapping = BTreeMap<String, Value>;

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Value {
    /// Human-readable name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Unsigned(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key if this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Canonical text form used when a value is interpolated into a larger string.
    ///
    /// Strings render verbatim, numbers and booleans in their natural form,
    /// `null` as `null`, and sequences/mappings as compact JSON with sorted keys.
    pub fn render(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Unsigned(u) => u.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => s.clone(),
            Self::Sequence(_) | Self::Mapping(_) => serde_json::Value::from(self).to_string(),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Unsigned(u) => serializer.serialize_u64(*u),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => items.serialize(serializer),
            Self::Mapping(map) => map.serialize(serializer),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Self::Integer(i),
                (None, Some(u)) => Self::Unsigned(u),
                (None, None) => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// Mapping insertion follows key order, so the JSON object stays sorted.
/// Non-finite floats become `null`, as `serde_json` writes them.
impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Integer(i) => Self::from(*i),
            Value::Unsigned(u) => Self::from(*u),
            Value::Float(f) => serde_json::Number::from_f64(*f).map_or(Self::Null, Self::Number),
            Value::String(s) => Self::String(s.clone()),
            Value::Sequence(items) => Self::Array(items.iter().map(Self::from).collect()),
            Value::Mapping(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from(json!(42)), Value::Integer(42));
        assert_eq!(Value::from(json!(-7)), Value::Integer(-7));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!(u64::MAX)), Value::Unsigned(u64::MAX));
        assert_eq!(Value::from(json!(i64::MAX)), Value::Integer(i64::MAX));
    }

    #[test]
    fn test_large_unsigned_round_trips() {
        let value = Value::from(json!({"limit": 18446744073709551615u64}));
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"limit":18446744073709551615}"#
        );
        assert_eq!(value.get("limit").unwrap().render(), "18446744073709551615");
    }

    #[test]
    fn test_from_json_nested() {
        let value = Value::from(json!({"b": [1, true, null], "a": {"x": "y"}}));
        let map = value.as_mapping().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(
            map["b"],
            Value::Sequence(vec![Value::Integer(1), Value::Bool(true), Value::Null])
        );
        assert_eq!(value.get("a").and_then(|a| a.get("x")), Some(&Value::from("y")));
    }

    #[test]
    fn test_render_scalars() {
        assert_eq!(Value::from("node").render(), "node");
        assert_eq!(Value::Integer(8080).render(), "8080");
        assert_eq!(Value::Float(3.0).render(), "3");
        assert_eq!(Value::Float(0.25).render(), "0.25");
        assert_eq!(Value::Bool(false).render(), "false");
        assert_eq!(Value::Null.render(), "null");
    }

    #[test]
    fn test_render_collections_as_compact_json() {
        let seq = Value::from(json!(["./a.js", 2]));
        assert_eq!(seq.render(), r#"["./a.js",2]"#);

        let map = Value::from(json!({"z": 1, "a": "b"}));
        assert_eq!(map.render(), r#"{"a":"b","z":1}"#);

        let nested = Value::from(json!([{"b": 1.5, "a": null}, "x\"y"]));
        assert_eq!(nested.render(), r#"[{"a":null,"b":1.5},"x\"y"]"#);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Float(1.0).type_name(), "float");
        assert_eq!(Value::Mapping(Mapping::new()).type_name(), "mapping");
    }
}
