//! Cloudflare MCP Server
//!
//! Exposes Cloudflare DNS, Workers, KV, security, load balancing, Zero Trust
//! and analytics operations as MCP tools over stdio.

use std::sync::Arc;

use clap::Parser;

use cloud_mcp_servers::cloudflare::{CloudflareClient, CloudflareTools};
use cloud_mcp_servers::config::CloudflareConfig;
use cloud_mcp_servers::error::Result;
use cloud_mcp_servers::mcp::server::McpServer;

/// Cloudflare MCP Server
#[derive(Parser)]
#[command(name = "cloudflare-mcp-server")]
#[command(author, version, about = "Cloudflare MCP Server - A Model Context Protocol server for the Cloudflare API")]
struct Cli {
    /// Override the Cloudflare API base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match load_config(cli.base_url) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let api = Arc::new(CloudflareClient::new(config));
    let mut server = McpServer::new(CloudflareTools::new(api));
    server.run_stdio().await?;

    Ok(())
}

fn load_config(base_url: Option<String>) -> Result<CloudflareConfig> {
    let config = CloudflareConfig::from_env()?;
    match base_url {
        Some(base_url) => CloudflareConfig::new(config.api_token, base_url),
        None => Ok(config),
    }
}
