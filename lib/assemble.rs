//! Output document assembly.
//!
//! Wraps resolved adapter trees (or the full server set) into the top-level
//! shape each consumer expects.

use serde::{Serialize, Serializer};

use crate::server::ServerSet;
use crate::value::{Mapping, Value};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Container key used when an adapter does not name one.
pub const DEFAULT_CONTAINER_KEY: &str = "mcpServers";

/// Container key of every TOML document.
///
/// TOML consumers (Codex) always read `[mcp_servers.<name>]`, so an adapter's
/// custom container key is ignored for TOML output.
pub const TOML_CONTAINER_KEY: &str = "mcp_servers";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A document ready for serialization: `{ container_key: { name: config, ... } }`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputDocument {
    container_key: String,
    entries: Mapping,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl OutputDocument {
    pub fn container_key(&self) -> &str {
        &self.container_key
    }

    /// Server entries keyed by display name.
    pub fn entries(&self) -> &Mapping {
        &self.entries
    }

    /// Convert into a plain value tree.
    pub fn to_value(&self) -> Value {
        let mut root = Mapping::new();
        root.insert(
            self.container_key.clone(),
            Value::Mapping(self.entries.clone()),
        );
        Value::Mapping(root)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Name under which a resolved config is published.
///
/// Uses the resolved tree's own `name` when it is a non-empty string,
/// otherwise the adapter's tool name.
pub fn display_name(resolved: &Value, tool: &str) -> String {
    match resolved.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => tool.to_string(),
    }
}

/// Container key actually used for a document.
pub fn effective_container_key(container_key: &str, is_toml: bool) -> &str {
    if is_toml {
        TOML_CONTAINER_KEY
    } else if container_key.is_empty() {
        DEFAULT_CONTAINER_KEY
    } else {
        container_key
    }
}

/// Wrap a resolved adapter tree into a single-entry document.
pub fn assemble(resolved: Value, tool: &str, container_key: &str, is_toml: bool) -> OutputDocument {
    let name = display_name(&resolved, tool);
    let mut entries = Mapping::new();
    entries.insert(name, resolved);

    OutputDocument {
        container_key: effective_container_key(container_key, is_toml).to_string(),
        entries,
    }
}

/// Build the aggregate document listing every server under `mcpServers`.
pub fn aggregate(servers: &ServerSet) -> OutputDocument {
    OutputDocument {
        container_key: DEFAULT_CONTAINER_KEY.to_string(),
        entries: servers
            .iter()
            .map(|(name, store)| (name.clone(), Value::from(store)))
            .collect(),
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Serialize for OutputDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::AttributeStore;
    use serde_json::json;
    use std::path::Path;

    #[test]
    fn test_display_name_prefers_resolved_name() {
        let resolved = Value::from(json!({"name": "custom", "url": "u"}));
        assert_eq!(display_name(&resolved, "gemini"), "custom");
    }

    #[test]
    fn test_display_name_falls_back_to_tool() {
        assert_eq!(display_name(&Value::from(json!({"url": "u"})), "gemini"), "gemini");
        assert_eq!(display_name(&Value::from(json!({"name": ""})), "gemini"), "gemini");
        assert_eq!(display_name(&Value::from(json!({"name": 42})), "gemini"), "gemini");
    }

    #[test]
    fn test_effective_container_key() {
        assert_eq!(effective_container_key("", false), "mcpServers");
        assert_eq!(effective_container_key("servers", false), "servers");
        assert_eq!(effective_container_key("servers", true), "mcp_servers");
        assert_eq!(effective_container_key("", true), "mcp_servers");
    }

    #[test]
    fn test_assemble_json_shape() {
        let config = json!({"type": "http", "url": "https://gitlab.com/api/v4/mcp"});
        let doc = assemble(Value::from(config.clone()), "gitlab-duo-cli", "", false);
        assert_eq!(doc.container_key(), "mcpServers");
        assert_eq!(
            doc.to_value(),
            Value::from(json!({"mcpServers": {"gitlab-duo-cli": config}}))
        );
    }

    #[test]
    fn test_assemble_honors_custom_key_for_json_only() {
        let resolved = Value::from(json!({"command": "node"}));

        let json_doc = assemble(resolved.clone(), "vscode", "servers", false);
        assert_eq!(json_doc.container_key(), "servers");

        let toml_doc = assemble(resolved, "codex", "servers", true);
        assert_eq!(toml_doc.container_key(), "mcp_servers");
        assert!(toml_doc.entries().contains_key("codex"));
    }

    #[test]
    fn test_aggregate_keys_by_server_name() {
        let mut servers = ServerSet::new();
        for value in [
            json!({"name": "gitlab", "transport": "http", "url": "https://gitlab.com/api/v4/mcp"}),
            json!({"name": "example_http", "transport": "http", "url": "http://localhost:3333/mcp"}),
        ] {
            let store = AttributeStore::from_value(Value::from(value), Path::new("s.json")).unwrap();
            servers.insert(store.name().to_string(), store);
        }

        let doc = aggregate(&servers);
        assert_eq!(doc.container_key(), "mcpServers");
        assert_eq!(
            doc.entries().keys().collect::<Vec<_>>(),
            vec!["example_http", "gitlab"]
        );
        assert_eq!(
            doc.entries()["gitlab"].get("url"),
            Some(&Value::from("https://gitlab.com/api/v4/mcp"))
        );
    }
}
