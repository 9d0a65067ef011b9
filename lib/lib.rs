//! `mcp-bridge` library.
//!
//! Turns shared MCP server descriptors into the configuration files each
//! tool expects, by filling adapter templates with server attributes.

pub mod adapter;
pub mod assemble;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod loader;
pub mod output;
pub mod serialize;
pub mod server;
pub mod suggest;
pub mod value;
pub mod vars;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use adapter::*;
pub use assemble::*;
pub use commands::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use generator::*;
pub use loader::*;
pub use output::*;
pub use serialize::*;
pub use server::*;
pub use suggest::*;
pub use value::*;
pub use vars::*;
