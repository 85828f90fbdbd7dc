//! Oracle Cloud Infrastructure module
//!
//! Tool catalog, CLI runner, and handlers for the OCI MCP server.

pub mod catalog;
pub mod cli;
pub mod tools;
pub mod types;

pub use catalog::OciTool;
pub use cli::{CliInvocation, OciCli, OciCliRunner};
pub use tools::OciTools;
