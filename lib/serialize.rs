//! Rendering output documents as JSON or TOML.

use std::fmt;

use crate::assemble::OutputDocument;
use crate::error::{BridgeError, BridgeResult};
use crate::value::Value;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// On-disk format of a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Toml,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl OutputFormat {
    /// Parse a `format_type` descriptor value (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }

    /// File extension for generated files.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn is_toml(&self) -> bool {
        matches!(self, Self::Toml)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Serialize a document in the given format.
///
/// JSON is pretty-printed with two-space indentation and a trailing newline.
/// TOML rejects `null` values and integers above `i64::MAX` anywhere in the
/// document.
pub fn serialize(document: &OutputDocument, format: OutputFormat) -> BridgeResult<Vec<u8>> {
    match format {
        OutputFormat::Json => {
            let mut content = serde_json::to_string_pretty(document)?;
            content.push('\n');
            Ok(content.into_bytes())
        }
        OutputFormat::Toml => {
            let value = document.to_value();
            check_toml_representable(&value, "")?;
            Ok(toml::to_string(&value)?.into_bytes())
        }
    }
}

/// Ensure every leaf of a tree has a TOML representation.
fn check_toml_representable(value: &Value, location: &str) -> BridgeResult<()> {
    match value {
        Value::Null | Value::Unsigned(_) => Err(BridgeError::UnsupportedValueType {
            location: location.to_string(),
            value_type: value.type_name().to_string(),
            format: OutputFormat::Toml.to_string(),
        }),
        Value::Mapping(map) => {
            for (key, child) in map {
                let child_location = if location.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", location, key)
                };
                check_toml_representable(child, &child_location)?;
            }
            Ok(())
        }
        Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                check_toml_representable(item, &format!("{}[{}]", location, index))?;
            }
            Ok(())
        }
        Value::Bool(_) | Value::Integer(_) | Value::Float(_) | Value::String(_) => Ok(()),
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Toml => f.write_str("TOML"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
