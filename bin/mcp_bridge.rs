//! `mcp-bridge` generates MCP configuration files for every configured tool.

use clap::Parser;
use colored::Colorize;
use mcp_bridge::{BridgeError, BridgeResult, Cli, SERVERS_DIR, format_suggestions, generate};
use tracing_subscriber::EnvFilter;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn main() {
    init_tracing();

    if let Err(e) = run() {
        print_error(&e);
        std::process::exit(1);
    }
}

fn run() -> BridgeResult<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().map_err(|e| BridgeError::io(".", e))?;
    let config = cli.into_config(cwd);

    let report = generate(&config)?;
    for file in &report.files {
        let label = file.tool.as_deref().unwrap_or("all servers");
        println!(
            "  {} Generated {} {}",
            "✓".bright_green(),
            file.path.display(),
            format!("({})", label).dimmed()
        );
    }

    Ok(())
}

/// Print an error with appropriate formatting based on error type.
fn print_error(e: &BridgeError) {
    println!();
    match e {
        BridgeError::Load { path, message } => {
            println!("  {} Invalid descriptor", "error[load]".bright_red().bold());
            println!();
            println!("    {}: {}", "File".dimmed(), path.display());
            println!("    {}", message);
        }
        BridgeError::UnknownServerReference {
            tool,
            server,
            suggestions,
        } => {
            println!(
                "  {} Unknown server '{}'",
                "error".bright_red().bold(),
                server.bright_white()
            );
            println!();
            println!("    Adapter for tool '{}' targets a server that is not defined.", tool);
            println!();
            match format_suggestions(suggestions) {
                Some(hint) => println!("    {}: {}", "hint".bright_blue().bold(), hint),
                None => println!(
                    "    {}: Add a descriptor named '{}' under {}",
                    "hint".bright_blue().bold(),
                    server,
                    SERVERS_DIR.bright_white()
                ),
            }
        }
        BridgeError::Adapter {
            tool,
            server,
            path,
            source,
        } => {
            println!(
                "  {} Could not generate config for tool '{}'",
                "error".bright_red().bold(),
                tool.bright_white()
            );
            println!();
            println!("    {}: {}", "Server".dimmed(), server);
            println!("    {}: {}", "File".dimmed(), path.display());
            println!("    {}", source);
        }
        BridgeError::UnresolvedPlaceholder { tool, placeholders } => {
            println!(
                "  {} Unresolved placeholders for tool '{}'",
                "error".bright_red().bold(),
                tool.bright_white()
            );
            println!();
            for placeholder in placeholders {
                println!("    {}", placeholder);
            }
            println!();
            println!(
                "    {}: Run without {} to keep them as literal text",
                "hint".bright_blue().bold(),
                "--strict".bright_white()
            );
        }
        BridgeError::UnsupportedValueType {
            location,
            value_type,
            format,
        } => {
            println!(
                "  {} {} value cannot be written as {}",
                "error".bright_red().bold(),
                value_type,
                format
            );
            println!();
            println!("    {}: {}", "At".dimmed(), location);
        }
        _ => {
            let msg = e.to_string();
            if let Some((prefix, rest)) = msg.split_once(": ")
                && prefix.ends_with("error")
            {
                println!(
                    "  {} {}",
                    format!("error[{}]", prefix.to_lowercase().replace(" error", ""))
                        .bright_red()
                        .bold(),
                    rest.dimmed()
                );
            } else {
                println!("  {} {}", "error".bright_red().bold(), msg);
            }
        }
    }
    println!();
}

/// Initialize tracing. Only enables logging when RUST_LOG is set.
fn init_tracing() {
    let rust_log_set = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .is_some();

    if !rust_log_set {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .init();
}
