//! Writing generated documents to disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{BridgeError, BridgeResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A file produced by a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Tool the file was generated for, `None` for the aggregate document.
    pub tool: Option<String>,
    pub path: PathBuf,
}

/// Files written by a generation run, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub files: Vec<GeneratedFile>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl GenerationReport {
    pub fn push(&mut self, tool: Option<&str>, path: PathBuf) {
        self.files.push(GeneratedFile {
            tool: tool.map(str::to_string),
            path,
        });
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.path.as_path())
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Write a file atomically (temp file + rename), creating parent directories.
pub fn write_output(path: &Path, content: &[u8]) -> BridgeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| BridgeError::io(parent, e))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    {
        let mut file = fs::File::create(&temp_path).map_err(|e| BridgeError::io(&temp_path, e))?;
        file.write_all(content)
            .and_then(|_| file.sync_all())
            .map_err(|e| {
                let _ = fs::remove_file(&temp_path);
                BridgeError::io(&temp_path, e)
            })?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BridgeError::io(path, e)
    })?;

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".gitlab/duo/mcp.json");

        write_output(&path, b"{}\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
        assert!(!dir.path().join(".gitlab/duo/mcp.json.tmp").exists());
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "old").unwrap();

        write_output(&path, b"new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_fails_when_parent_is_a_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blocker"), "file").unwrap();

        let err = write_output(&dir.path().join("blocker/out.json"), b"{}").unwrap_err();
        match err {
            BridgeError::Io { path, .. } => assert!(path.ends_with("blocker")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_report_paths() {
        let mut report = GenerationReport::default();
        report.push(None, PathBuf::from(".mcp.json"));
        report.push(Some("codex"), PathBuf::from(".codex/config.toml"));

        assert_eq!(report.files[1].tool.as_deref(), Some("codex"));
        assert_eq!(
            report.paths().collect::<Vec<_>>(),
            vec![Path::new(".mcp.json"), Path::new(".codex/config.toml")]
        );
    }
}
