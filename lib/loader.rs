//! Discovery and loading of server and adapter descriptors.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::adapter::{AdapterDescriptor, AdapterSpec};
use crate::constants::DESCRIPTOR_EXT;
use crate::error::{BridgeError, BridgeResult};
use crate::server::{AttributeStore, ServerSet};
use crate::value::Value;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// List descriptor files directly inside `dir`, sorted by file name.
pub fn descriptor_files(dir: &Path) -> BridgeResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(BridgeError::load(dir, "directory does not exist"));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path
                .extension()
                .map(|ext| ext == DESCRIPTOR_EXT)
                .unwrap_or(false)
        {
            files.push(path.to_path_buf());
        }
    }

    tracing::debug!("Found {} descriptor(s) in {}", files.len(), dir.display());
    Ok(files)
}

/// Load and validate every server descriptor in `dir`.
pub fn load_servers(dir: &Path) -> BridgeResult<ServerSet> {
    let mut servers = ServerSet::new();

    for path in descriptor_files(dir)? {
        let value: serde_json::Value = read_json(&path)?;
        let store = AttributeStore::from_value(Value::from(value), &path)?;

        if servers.contains_key(store.name()) {
            return Err(BridgeError::load(
                &path,
                format!("duplicate server name '{}'", store.name()),
            ));
        }

        tracing::debug!("Loaded server '{}' from {}", store.name(), path.display());
        servers.insert(store.name().to_string(), store);
    }

    Ok(servers)
}

/// Load every adapter descriptor in `dir`, skipping those without a tool.
pub fn load_adapters(dir: &Path) -> BridgeResult<Vec<AdapterSpec>> {
    let mut adapters = Vec::new();

    for path in descriptor_files(dir)? {
        let descriptor: AdapterDescriptor = read_json(&path)?;
        match AdapterSpec::from_descriptor(descriptor, &path)? {
            Some(spec) => adapters.push(spec),
            None => tracing::debug!("Skipping adapter without tool: {}", path.display()),
        }
    }

    Ok(adapters)
}

/// Read and parse a JSON file, attributing failures to the file.
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> BridgeResult<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| BridgeError::load(path, format!("failed to read file: {}", e)))?;
    serde_json::from_str(&content)
        .map_err(|e| BridgeError::load(path, format!("invalid JSON: {}", e)))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::OutputFormat;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_json(dir: &Path, file: &str, value: serde_json::Value) {
        fs::write(dir.join(file), serde_json::to_string_pretty(&value).unwrap()).unwrap();
    }

    #[test]
    fn test_load_servers() {
        let dir = TempDir::new().unwrap();
        write_json(
            dir.path(),
            "s1.json",
            json!({"name": "server1", "transport": "stdio", "command": "node", "args": ["s1.js"]}),
        );
        write_json(
            dir.path(),
            "s2.json",
            json!({"name": "server2", "transport": "http", "url": "http://localhost:1234"}),
        );
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let servers = load_servers(dir.path()).unwrap();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers["server1"].name(), "server1");
        assert_eq!(
            servers["server2"].get("url"),
            Some(&Value::from("http://localhost:1234"))
        );
    }

    #[test]
    fn test_duplicate_server_name() {
        let dir = TempDir::new().unwrap();
        let server = json!({"name": "dup", "transport": "http", "url": "u"});
        write_json(dir.path(), "a.json", server.clone());
        write_json(dir.path(), "b.json", server);

        let err = load_servers(dir.path()).unwrap_err();
        match err {
            BridgeError::Load { path, message } => {
                assert!(path.ends_with("b.json"));
                assert!(message.contains("duplicate server name 'dup'"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.json"), "{ invalid json }").unwrap();

        let err = load_servers(dir.path()).unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = load_servers(&dir.path().join("missing")).unwrap_err();
        assert!(err.to_string().contains("directory does not exist"));
    }

    #[test]
    fn test_load_adapters_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        write_json(
            dir.path(),
            "b_cursor.json",
            json!({"tool": "cursor", "server": "s", "mapping": {"command": "{{command}}"}}),
        );
        write_json(
            dir.path(),
            "a_codex.json",
            json!({"tool": "codex", "server": "s", "format_type": "toml"}),
        );
        write_json(dir.path(), "c_disabled.json", json!({"server": "s"}));
        write_json(dir.path(), "d_empty_tool.json", json!({"tool": "", "server": "s"}));

        let adapters = load_adapters(dir.path()).unwrap();
        let tools: Vec<_> = adapters.iter().map(|a| a.tool.as_str()).collect();
        assert_eq!(tools, vec!["codex", "cursor"]);
        assert_eq!(adapters[0].format, OutputFormat::Toml);
        assert!(adapters[1].source.ends_with("b_cursor.json"));
    }

    #[test]
    fn test_adapter_mapping_must_be_object() {
        let dir = TempDir::new().unwrap();
        write_json(dir.path(), "a.json", json!({"tool": "t", "mapping": ["x"]}));

        let err = load_adapters(dir.path()).unwrap_err();
        assert!(matches!(err, BridgeError::Load { .. }));
    }
}
