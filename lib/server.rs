//! Server attribute stores.
//!
//! A server descriptor is a flat JSON object describing how to reach one MCP
//! server. Once validated it becomes an immutable [`AttributeStore`] whose
//! attributes feed placeholder substitution.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Serialize, Serializer};

use crate::error::{BridgeError, BridgeResult};
use crate::value::{Mapping, Value};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Transport used to reach an MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http,
}

/// Validated attributes of a single server.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeStore {
    name: String,
    transport: Transport,
    attributes: Mapping,
}

/// All servers of one run, keyed by server name.
pub type ServerSet = BTreeMap<String, AttributeStore>;

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Transport {
    /// Parse a transport name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "stdio" => Some(Self::Stdio),
            "http" => Some(Self::Http),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
        }
    }

    /// Attribute that must be present for this transport.
    pub fn required_attribute(&self) -> &'static str {
        match self {
            Self::Stdio => "command",
            Self::Http => "url",
        }
    }
}

impl AttributeStore {
    /// Validate a parsed descriptor and build a store from it.
    ///
    /// `source` is only used for error messages.
    pub fn from_value(value: Value, source: &Path) -> BridgeResult<Self> {
        let Value::Mapping(attributes) = value else {
            return Err(BridgeError::load(
                source,
                format!(
                    "server definition must be an object, found {}",
                    value.type_name()
                ),
            ));
        };

        let name = match attributes.get("name").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(BridgeError::load(
                    source,
                    "server definition is missing 'name' field",
                ));
            }
        };

        if let Some(key) = attributes.keys().find(|k| k.is_empty()) {
            return Err(BridgeError::load(
                source,
                format!("server '{}' has an empty attribute key '{}'", name, key),
            ));
        }

        let transport = match attributes.get("transport") {
            Some(Value::String(t)) => Transport::parse(t).ok_or_else(|| {
                BridgeError::load(
                    source,
                    format!("server '{}' has unsupported transport: {}", name, t),
                )
            })?,
            _ => {
                return Err(BridgeError::load(
                    source,
                    format!("server '{}' is missing or has invalid 'transport' field", name),
                ));
            }
        };

        let required = transport.required_attribute();
        if !attributes.contains_key(required) {
            return Err(BridgeError::load(
                source,
                format!(
                    "server '{}' ({}) is missing '{}'",
                    name,
                    transport.as_str(),
                    required
                ),
            ));
        }

        Ok(Self {
            name,
            transport,
            attributes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    /// Look up an attribute by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// All attributes in ascending key order.
    pub fn attributes(&self) -> &Mapping {
        &self.attributes
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Serialize for AttributeStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.attributes.serialize(serializer)
    }
}

impl From<&AttributeStore> for Value {
    fn from(store: &AttributeStore) -> Self {
        Value::Mapping(store.attributes.clone())
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(value: serde_json::Value) -> BridgeResult<AttributeStore> {
        AttributeStore::from_value(Value::from(value), Path::new("servers/test.json"))
    }

    #[test]
    fn test_valid_stdio_server() {
        let s = store(json!({
            "name": "example_stdio",
            "transport": "stdio",
            "command": "node",
            "args": ["./tools/example.js"]
        }))
        .unwrap();
        assert_eq!(s.name(), "example_stdio");
        assert_eq!(s.transport(), Transport::Stdio);
        assert_eq!(s.get("command"), Some(&Value::from("node")));
        assert_eq!(s.attributes().len(), 4);
    }

    #[test]
    fn test_valid_http_server() {
        let s = store(json!({"name": "gitlab", "transport": "http", "url": "https://gitlab.com"}))
            .unwrap();
        assert_eq!(s.transport(), Transport::Http);
    }

    #[test]
    fn test_missing_name() {
        let err = store(json!({"transport": "http", "url": "x"})).unwrap_err();
        assert!(err.to_string().contains("missing 'name'"));

        let err = store(json!({"name": "", "transport": "http", "url": "x"})).unwrap_err();
        assert!(err.to_string().contains("missing 'name'"));
    }

    #[test]
    fn test_transport_validation() {
        let err = store(json!({"name": "a", "url": "x"})).unwrap_err();
        assert!(err.to_string().contains("invalid 'transport'"));

        let err = store(json!({"name": "a", "transport": 5})).unwrap_err();
        assert!(err.to_string().contains("invalid 'transport'"));

        let err = store(json!({"name": "a", "transport": "sse", "url": "x"})).unwrap_err();
        assert!(err.to_string().contains("unsupported transport: sse"));
    }

    #[test]
    fn test_required_attribute_per_transport() {
        let err = store(json!({"name": "a", "transport": "stdio", "url": "x"})).unwrap_err();
        assert!(err.to_string().contains("(stdio) is missing 'command'"));

        let err = store(json!({"name": "a", "transport": "http", "command": "x"})).unwrap_err();
        assert!(err.to_string().contains("(http) is missing 'url'"));
    }

    #[test]
    fn test_non_object_descriptor() {
        let err = store(json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, BridgeError::Load { .. }));
        assert!(err.to_string().contains("found sequence"));
    }

    #[test]
    fn test_serializes_as_attribute_map() {
        let s = store(json!({"url": "u", "name": "n", "transport": "http"})).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"name":"n","transport":"http","url":"u"}"#);
    }
}
