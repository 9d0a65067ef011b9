//! Error types for mcp-bridge.

use std::path::PathBuf;
use thiserror::Error;

use crate::adapter::AdapterSpec;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result type for mcp-bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Error type for mcp-bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A server or adapter descriptor could not be loaded.
    #[error("Failed to load {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    /// An adapter targets a server that was not loaded.
    #[error("Adapter for tool '{tool}' targets unknown server '{server}'")]
    UnknownServerReference {
        tool: String,
        server: String,
        /// Loaded server names close to `server`.
        suggestions: Vec<String>,
    },

    /// A value has no representation in the output format.
    #[error("Unsupported value type: {value_type} at '{location}' cannot be written as {format}")]
    UnsupportedValueType {
        /// Dotted path of the offending value inside the document.
        location: String,
        value_type: String,
        format: String,
    },

    /// One adapter's document could not be rendered or written.
    #[error("Failed to generate {} for tool '{tool}' (server '{server}'): {source}", path.display())]
    Adapter {
        tool: String,
        server: String,
        /// Output path relative to the repository root.
        path: PathBuf,
        #[source]
        source: Box<BridgeError>,
    },

    /// Placeholders survived substitution while strict mode is on.
    #[error("Unresolved placeholders for tool '{tool}': {}", placeholders.join(", "))]
    UnresolvedPlaceholder {
        tool: String,
        placeholders: Vec<String>,
    },

    /// An output file or directory could not be written.
    #[error("IO error: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization error.
    #[error("Serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Walkdir error.
    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl BridgeError {
    /// Build a [`BridgeError::Load`] for the given descriptor path.
    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Attach adapter context to a failure while producing its document.
    pub fn adapter(adapter: &AdapterSpec, source: BridgeError) -> Self {
        Self::Adapter {
            tool: adapter.tool.clone(),
            server: adapter.server.clone(),
            path: adapter.output_path.clone(),
            source: Box::new(source),
        }
    }

    /// Build a [`BridgeError::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
