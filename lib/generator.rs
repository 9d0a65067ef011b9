//! End-to-end generation: load descriptors, resolve adapters, write documents.

use crate::adapter::{AdapterSpec, apply_adapter};
use crate::assemble::{aggregate, assemble};
use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::loader::{load_adapters, load_servers};
use crate::output::{GenerationReport, write_output};
use crate::serialize::{OutputFormat, serialize};
use crate::server::ServerSet;
use crate::vars::unresolved_placeholders;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Run a full generation.
///
/// The aggregate document is written first, then one document per adapter in
/// descriptor order. The first error stops the run; files already written are
/// left in place.
pub fn generate(config: &BridgeConfig) -> BridgeResult<GenerationReport> {
    let mut report = GenerationReport::default();

    let servers = load_servers(&config.servers_dir)?;
    tracing::info!("Loaded {} server(s)", servers.len());

    generate_aggregate(&servers, config)?;
    report.push(None, config.aggregate_output.clone());

    let adapters = load_adapters(&config.adapters_dir)?;
    tracing::info!("Loaded {} adapter(s)", adapters.len());

    for adapter in &adapters {
        let path = config.repo_root.join(&adapter.output_path);
        let content = render_adapter(adapter, &servers, config.strict_placeholders)?;
        write_output(&path, &content).map_err(|e| BridgeError::adapter(adapter, e))?;
        tracing::info!("Generated {} for tool '{}'", path.display(), adapter.tool);
        report.push(Some(&adapter.tool), path);
    }

    Ok(report)
}

/// Write the aggregate `mcpServers` document.
pub fn generate_aggregate(servers: &ServerSet, config: &BridgeConfig) -> BridgeResult<()> {
    let content = serialize(&aggregate(servers), OutputFormat::Json)?;
    write_output(&config.aggregate_output, &content)?;
    tracing::info!("Generated {}", config.aggregate_output.display());
    Ok(())
}

/// Resolve, assemble and serialize one adapter without touching the filesystem.
pub fn render_adapter(adapter: &AdapterSpec, servers: &ServerSet, strict: bool) -> BridgeResult<Vec<u8>> {
    let resolved = apply_adapter(adapter, servers)?;

    let unresolved = unresolved_placeholders(&resolved);
    if !unresolved.is_empty() {
        if strict {
            return Err(BridgeError::UnresolvedPlaceholder {
                tool: adapter.tool.clone(),
                placeholders: unresolved,
            });
        }
        tracing::warn!(
            "Unresolved placeholders for tool '{}' (server '{}'): {}",
            adapter.tool,
            adapter.server,
            unresolved.join(", ")
        );
    }

    let document = assemble(
        resolved,
        &adapter.tool,
        &adapter.container_key,
        adapter.format.is_toml(),
    );
    serialize(&document, adapter.format).map_err(|e| BridgeError::adapter(adapter, e))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
