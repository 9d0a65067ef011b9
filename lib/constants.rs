//! Constants for mcp-bridge.
//!
//! Paths are relative to the repository root passed in [`crate::BridgeConfig`].

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Directory holding server descriptors.
pub const SERVERS_DIR: &str = ".ai/mcp/servers";

/// Directory holding adapter descriptors.
pub const ADAPTERS_DIR: &str = ".ai/mcp/adapters";

/// Aggregate document listing every server.
pub const AGGREGATE_OUTPUT: &str = ".mcp.json";

/// Extension of descriptor files.
pub const DESCRIPTOR_EXT: &str = "json";

/// Environment variable overriding the repository root.
pub const ROOT_ENV: &str = "MCP_BRIDGE_ROOT";
