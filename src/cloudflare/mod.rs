//! Cloudflare module
//!
//! Tool catalog, API client, and handlers for the Cloudflare MCP server.

pub mod catalog;
pub mod client;
pub mod optimization;
pub mod steps;
pub mod tools;
pub mod types;

pub use catalog::CloudflareTool;
pub use client::{CloudflareApi, CloudflareClient};
pub use tools::CloudflareTools;
