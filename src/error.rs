//! Error types for the cloud MCP servers
//!
//! This module defines the error hierarchy for all operations in both servers.

use thiserror::Error;

use crate::mcp::types::JsonRpcError;

/// Main error type for the cloud MCP servers
#[derive(Error, Debug)]
pub enum CloudMcpError {
    /// Cloudflare API errors
    #[error("Cloudflare API error: {0}")]
    Cloudflare(#[from] CloudflareApiError),

    /// OCI CLI errors
    #[error("OCI CLI error: {0}")]
    Oci(#[from] OciCliError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Cloudflare API errors
#[derive(Error, Debug)]
pub enum CloudflareApiError {
    /// The API answered with `success: false`
    #[error("{message}")]
    Rejected { message: String },

    /// The API answered `success: true` but the result lacks what we asked for
    #[error("unexpected response: {message}")]
    UnexpectedResponse { message: String },
}

/// OCI CLI errors
#[derive(Error, Debug)]
pub enum OciCliError {
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process exited with code {code}{}", format_stderr(.stderr))]
    NonZeroExit { code: i32, stderr: String },

    #[error("Process terminated by signal")]
    Terminated,

    #[error("invalid JSON output: {0}")]
    InvalidOutput(#[source] serde_json::Error),
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} environment variable is required")]
    MissingEnvVar { var: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },
}

/// Result type alias for cloud MCP operations
pub type Result<T> = std::result::Result<T, CloudMcpError>;

impl CloudMcpError {
    /// Shorthand for a rejected Cloudflare call
    pub fn cloudflare(message: impl Into<String>) -> Self {
        CloudMcpError::Cloudflare(CloudflareApiError::Rejected {
            message: message.into(),
        })
    }

    /// Classify this error for the JSON-RPC error channel.
    ///
    /// Unknown tools are `MethodNotFound`, argument problems are
    /// `InvalidParams`, and everything raised by a handler is `InternalError`.
    pub fn to_rpc_error(&self) -> JsonRpcError {
        match self {
            CloudMcpError::Mcp(McpError::UnknownTool { name }) => {
                JsonRpcError::method_not_found(format!("Unknown tool: {}", name))
            }
            CloudMcpError::Validation(e) => JsonRpcError::invalid_params(e.to_string()),
            other => JsonRpcError::internal_error(format!("Tool execution failed: {}", other)),
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ValidationError::InvalidArguments {
            message: errors.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for CloudMcpError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CloudMcpError::Validation(ValidationError::from(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::types::error_codes;

    #[test]
    fn test_error_display() {
        let err = ConfigError::MissingEnvVar {
            var: "CLOUDFLARE_API_TOKEN".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "CLOUDFLARE_API_TOKEN environment variable is required"
        );
    }

    #[test]
    fn test_provider_message_is_verbatim() {
        let err = CloudMcpError::cloudflare("Invalid zone identifier");
        assert_eq!(err.to_string(), "Cloudflare API error: Invalid zone identifier");
    }

    #[test]
    fn test_non_zero_exit_display() {
        let err: CloudMcpError = OciCliError::NonZeroExit {
            code: 2,
            stderr: String::new(),
        }
        .into();
        assert_eq!(err.to_string(), "OCI CLI error: Process exited with code 2");

        let err = OciCliError::NonZeroExit {
            code: 1,
            stderr: "NotAuthenticated".to_string(),
        };
        assert_eq!(err.to_string(), "Process exited with code 1: NotAuthenticated");
    }

    #[test]
    fn test_rpc_classification() {
        let unknown: CloudMcpError = McpError::UnknownTool {
            name: "cf_nope".to_string(),
        }
        .into();
        let rpc = unknown.to_rpc_error();
        assert_eq!(rpc.code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(rpc.message, "Unknown tool: cf_nope");

        let invalid: CloudMcpError = ValidationError::InvalidArguments {
            message: "missing field `zone_id`".to_string(),
        }
        .into();
        assert_eq!(invalid.to_rpc_error().code, error_codes::INVALID_PARAMS);

        let provider = CloudMcpError::cloudflare("Authentication error");
        let rpc = provider.to_rpc_error();
        assert_eq!(rpc.code, error_codes::INTERNAL_ERROR);
        assert_eq!(
            rpc.message,
            "Tool execution failed: Cloudflare API error: Authentication error"
        );
    }
}
