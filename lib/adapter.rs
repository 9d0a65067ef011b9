//! Adapter descriptors and their resolution against server attribute stores.
//!
//! An adapter describes how one tool wants a server's configuration shaped:
//! which server it targets, the template to fill in, and where and in which
//! format the result is written.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{BridgeError, BridgeResult};
use crate::serialize::OutputFormat;
use crate::server::ServerSet;
use crate::suggest::find_similar_names;
use crate::value::{Mapping, Value};
use crate::vars::resolve;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Raw adapter file contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdapterDescriptor {
    pub tool: String,
    pub server: String,
    /// Container key for JSON output.
    pub format: String,
    pub mapping: serde_json::Map<String, serde_json::Value>,
    pub output_path: Option<String>,
    /// `"json"` or `"toml"`.
    pub format_type: Option<String>,
}

/// A validated adapter ready to be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterSpec {
    pub tool: String,
    pub server: String,
    pub container_key: String,
    pub template: Value,
    pub format: OutputFormat,
    /// Output location relative to the repository root.
    pub output_path: PathBuf,
    /// Descriptor file this adapter came from.
    pub source: PathBuf,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl AdapterSpec {
    /// Validate a descriptor.
    ///
    /// Returns `Ok(None)` for descriptors without a tool, which are skipped.
    pub fn from_descriptor(descriptor: AdapterDescriptor, source: &Path) -> BridgeResult<Option<Self>> {
        if descriptor.tool.is_empty() {
            return Ok(None);
        }
        if descriptor.tool.contains(['/', '\\']) {
            return Err(BridgeError::load(
                source,
                format!(
                    "tool name '{}' must not contain path separators",
                    descriptor.tool
                ),
            ));
        }

        let format = match descriptor.format_type.as_deref() {
            Some(kind) => OutputFormat::parse(kind).ok_or_else(|| {
                BridgeError::load(
                    source,
                    format!(
                        "adapter for tool '{}' has unsupported format_type: {}",
                        descriptor.tool, kind
                    ),
                )
            })?,
            None if descriptor
                .output_path
                .as_deref()
                .is_some_and(|p| p.ends_with(".toml")) =>
            {
                OutputFormat::Toml
            }
            None => OutputFormat::Json,
        };

        let output_path = match descriptor.output_path.as_deref() {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => default_output_path(&descriptor.tool, format),
        };
        check_output_path(&output_path).map_err(|message| {
            BridgeError::load(
                source,
                format!("adapter for tool '{}': {}", descriptor.tool, message),
            )
        })?;

        let template: Mapping = descriptor
            .mapping
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect();

        Ok(Some(Self {
            tool: descriptor.tool,
            server: descriptor.server,
            container_key: descriptor.format,
            template: Value::Mapping(template),
            format,
            output_path,
            source: source.to_path_buf(),
        }))
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Default output location: `.mcp.<tool>.<ext>`.
pub fn default_output_path(tool: &str, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!(".mcp.{}.{}", tool, format.extension()))
}

/// Output paths must stay inside the repository root and end in a file name.
fn check_output_path(path: &Path) -> Result<(), String> {
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(format!(
                    "output path '{}' must not contain '..'",
                    path.display()
                ));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(format!(
                    "output path '{}' must be relative to the repository root",
                    path.display()
                ));
            }
        }
    }

    match path.components().next_back() {
        Some(Component::Normal(_)) => Ok(()),
        _ => Err(format!("output path '{}' must name a file", path.display())),
    }
}

/// Resolve an adapter's template against the server it targets.
pub fn apply_adapter(spec: &AdapterSpec, servers: &ServerSet) -> BridgeResult<Value> {
    let store = servers
        .get(&spec.server)
        .filter(|_| !spec.server.is_empty())
        .ok_or_else(|| BridgeError::UnknownServerReference {
            tool: spec.tool.clone(),
            server: spec.server.clone(),
            suggestions: find_similar_names(&spec.server, servers.keys().map(String::as_str)),
        })?;

    Ok(resolve(&spec.template, store))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
