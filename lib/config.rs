//! Run configuration.

use std::path::{Path, PathBuf};

use crate::constants::{ADAPTERS_DIR, AGGREGATE_OUTPUT, SERVERS_DIR};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Locations and switches for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Root that adapter output paths are resolved against.
    pub repo_root: PathBuf,
    pub servers_dir: PathBuf,
    pub adapters_dir: PathBuf,
    pub aggregate_output: PathBuf,
    /// Fail instead of warning when placeholders survive substitution.
    pub strict_placeholders: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl BridgeConfig {
    /// Standard layout rooted at `root`.
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            repo_root: root.to_path_buf(),
            servers_dir: root.join(SERVERS_DIR),
            adapters_dir: root.join(ADAPTERS_DIR),
            aggregate_output: root.join(AGGREGATE_OUTPUT),
            strict_placeholders: false,
        }
    }

    pub fn with_strict_placeholders(mut self, strict: bool) -> Self {
        self.strict_placeholders = strict;
        self
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_root_layout() {
        let config = BridgeConfig::from_root("/repo");
        assert_eq!(config.repo_root, PathBuf::from("/repo"));
        assert_eq!(config.servers_dir, PathBuf::from("/repo/.ai/mcp/servers"));
        assert_eq!(config.adapters_dir, PathBuf::from("/repo/.ai/mcp/adapters"));
        assert_eq!(config.aggregate_output, PathBuf::from("/repo/.mcp.json"));
        assert!(!config.strict_placeholders);
        assert!(config.with_strict_placeholders(true).strict_placeholders);
    }
}
