//! Cloud MCP Servers Library
//!
//! Model Context Protocol (MCP) servers exposing Cloudflare API and Oracle
//! Cloud Infrastructure CLI operations as tools.

pub mod cloudflare;
pub mod config;
pub mod error;
pub mod mcp;
pub mod oci;

pub use config::{CloudflareConfig, OciConfig};
pub use error::{CloudMcpError, Result};
