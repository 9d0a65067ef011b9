//! CLI definition.

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use std::path::PathBuf;

use crate::config::BridgeConfig;
use crate::constants::ROOT_ENV;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const CLI_EXAMPLES: &str = "\
Examples:
  mcp-bridge                         Generate configs for the current directory
  mcp-bridge --root ../my-repo       Generate configs for another repository
  mcp-bridge --strict                Fail on unresolved {{placeholders}}
  RUST_LOG=debug mcp-bridge          Show descriptor discovery";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// mcp-bridge - Generate tool-specific MCP configuration files.
#[derive(Debug, Parser)]
#[command(name = "mcp-bridge", author, version, styles = styles())]
#[command(
    about = "Generate tool-specific MCP configs from .ai/mcp descriptors",
    after_help = CLI_EXAMPLES
)]
pub struct Cli {
    /// Repository root containing `.ai/mcp` (defaults to the current directory).
    #[arg(long, env = ROOT_ENV, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Fail when a template references an attribute its server does not define.
    #[arg(long)]
    pub strict: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Cli {
    /// Build the run configuration, using `cwd` when no root was given.
    pub fn into_config(self, cwd: PathBuf) -> BridgeConfig {
        BridgeConfig::from_root(self.root.unwrap_or(cwd)).with_strict_placeholders(self.strict)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

pub fn styles() -> Styles {
    let bold = |color| Style::new().bold().fg_color(Some(Color::Ansi(color)));
    Styles::styled()
        .header(bold(AnsiColor::Yellow))
        .usage(bold(AnsiColor::Green))
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(bold(AnsiColor::Red))
        .invalid(bold(AnsiColor::Red))
        .valid(bold(AnsiColor::Green))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
