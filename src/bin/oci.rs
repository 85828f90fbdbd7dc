//! Oracle Cloud MCP Server
//!
//! Exposes OCI compute and networking operations as MCP tools over stdio by
//! driving the `oci` command-line client.

use std::sync::Arc;

use clap::Parser;

use cloud_mcp_servers::config::OciConfig;
use cloud_mcp_servers::error::Result;
use cloud_mcp_servers::mcp::server::McpServer;
use cloud_mcp_servers::oci::{OciCliRunner, OciTools};

/// Oracle Cloud MCP Server
#[derive(Parser)]
#[command(name = "oci-mcp-server")]
#[command(author, version, about = "Oracle Cloud MCP Server - A Model Context Protocol server for the OCI CLI")]
struct Cli {
    /// Path of the OCI CLI binary
    #[arg(long)]
    cli_path: Option<String>,

    /// Compartment used by list tools when none is given
    #[arg(long)]
    compartment_id: Option<String>,
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

    let mut config = OciConfig::from_env();
    if let Some(cli_path) = cli.cli_path {
        config.cli_path = cli_path;
    }
    if let Some(compartment_id) = cli.compartment_id {
        config.default_compartment_id = Some(compartment_id);
    }

    tracing::info!(cli = %config.cli_path, "Using OCI CLI");

    let runner = Arc::new(OciCliRunner::new(&config));
    let mut server = McpServer::new(OciTools::new(runner, &config));
    server.run_stdio().await?;

    Ok(())
}
