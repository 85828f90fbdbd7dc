//! Configuration management for the cloud MCP servers
//!
//! Handles environment variables and provider constants.

use std::fmt;

use crate::error::{CloudMcpError, ConfigError, Result};

/// Configuration for the Cloudflare server
#[derive(Clone)]
pub struct CloudflareConfig {
    /// API token sent as a bearer credential
    pub api_token: String,

    /// Base URL every endpoint is appended to
    pub api_base_url: String,
}

impl CloudflareConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup(cloudflare::API_TOKEN_ENV)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                CloudMcpError::Config(ConfigError::MissingEnvVar {
                    var: cloudflare::API_TOKEN_ENV.to_string(),
                })
            })?;

        let api_base_url = lookup(cloudflare::API_BASE_URL_ENV)
            .unwrap_or_else(|| cloudflare::API_BASE_URL.to_string());

        Self::new(api_token, api_base_url)
    }

    /// Create a configuration from explicit values
    pub fn new(api_token: impl Into<String>, api_base_url: impl Into<String>) -> Result<Self> {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(CloudMcpError::Config(ConfigError::InvalidConfig {
                message: format!("API base URL must be http(s): {}", api_base_url),
            }));
        }

        Ok(Self {
            api_token: api_token.into(),
            api_base_url,
        })
    }
}

impl fmt::Debug for CloudflareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareConfig")
            .field("api_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Configuration for the OCI server
#[derive(Debug, Clone)]
pub struct OciConfig {
    /// Program spawned for every CLI call
    pub cli_path: String,

    /// Compartment used by list tools when none is given
    pub default_compartment_id: Option<String>,
}

impl OciConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            cli_path: lookup(oci::CLI_PATH_ENV)
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| oci::DEFAULT_CLI.to_string()),
            default_compartment_id: lookup(oci::TENANCY_ENV).filter(|t| !t.is_empty()),
        }
    }
}

impl Default for OciConfig {
    fn default() -> Self {
        Self {
            cli_path: oci::DEFAULT_CLI.to_string(),
            default_compartment_id: None,
        }
    }
}

/// Cloudflare API constants
pub mod cloudflare {
    /// Base URL for the Cloudflare v4 API
    pub const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

    pub const API_TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";
    pub const API_BASE_URL_ENV: &str = "CLOUDFLARE_API_BASE_URL";

    /// Server name reported on `initialize`
    pub const SERVER_NAME: &str = "enhanced-cloudflare-mcp-server";
    pub const SERVER_VERSION: &str = "1.0.0";
}

/// OCI CLI constants
pub mod oci {
    /// Binary looked up on PATH when no override is set
    pub const DEFAULT_CLI: &str = "oci";

    pub const CLI_PATH_ENV: &str = "OCI_CLI_PATH";
    pub const TENANCY_ENV: &str = "OCI_TENANCY_OCID";

    /// Appended to every invocation
    pub const OUTPUT_ARGS: [&str; 2] = ["--output", "json"];

    /// Server name reported on `initialize`
    pub const SERVER_NAME: &str = "oracle-cloud-mcp-server";
    pub const SERVER_VERSION: &str = "0.1.0";
}
