//! MCP Server implementation
//!
//! Implements the Model Context Protocol server for stdio transport.

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::Result;
use crate::mcp::registry::ToolService;
use crate::mcp::types::*;

/// MCP server over a line-delimited JSON-RPC stream
pub struct McpServer<S: ToolService> {
    /// Tool set answering `tools/*` requests
    service: S,

    /// Whether the client sent `notifications/initialized`
    initialized: bool,
}

impl<S: ToolService> McpServer<S> {
    /// Create a new MCP server
    pub fn new(service: S) -> Self {
        Self {
            service,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the server on stdio until EOF or Ctrl-C
    pub async fn run_stdio(&mut self) -> Result<()> {
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };
        tracing::info!(server = %self.service.server_info().name, "MCP server running on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout(), shutdown)
            .await
    }

    /// Serve requests read from `input` until EOF or until `shutdown` resolves.
    ///
    /// One request is handled to completion before the next line is read.
    pub async fn serve<R, W, F>(&mut self, input: R, mut output: W, shutdown: F) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
        F: std::future::Future<Output = ()>,
    {
        let mut reader = BufReader::new(input);
        let mut buf = Vec::new();
        tokio::pin!(shutdown);

        loop {
            buf.clear();
            let read = tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, closing transport");
                    break;
                }
                read = reader.read_until(b'\n', &mut buf) => read?,
            };

            if read == 0 {
                tracing::info!("Input closed, stopping server");
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_message(line.trim_end_matches(&['\r', '\n'][..])).await,
                Err(e) => {
                    tracing::warn!("Dropping a line that is not valid UTF-8: {}", e);
                    Some(JsonRpcResponse::error(
                        RequestId::Number(0),
                        JsonRpcError::parse_error(e.to_string()),
                    ))
                }
            };

            if let Some(response) = response {
                write_response(&mut output, &response).await?;
            }
        }

        output.flush().await?;
        Ok(())
    }

    /// Handle an incoming JSON-RPC message, returning the reply if one is due
    pub async fn handle_message(&mut self, message: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(req) => req,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    RequestId::Number(0),
                    JsonRpcError::parse_error(e.to_string()),
                ));
            }
        };

        let outcome = match request.method.as_str() {
            methods::INITIALIZE => self.handle_initialize(),
            methods::INITIALIZED => {
                self.initialized = true;
                Ok(Value::Null)
            }
            methods::PING => Ok(serde_json::json!({})),
            methods::LIST_TOOLS => self.handle_list_tools(),
            methods::CALL_TOOL => self.handle_call_tool(request.params.clone()).await,
            other => Err(JsonRpcError::method_not_found(format!(
                "Method not found: {}",
                other
            ))),
        };

        let id = request.id?;
        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    /// Handle initialize request
    fn handle_initialize(&self) -> std::result::Result<Value, JsonRpcError> {
        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            server_info: self.service.server_info(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {}),
            },
        };

        to_value(result)
    }

    /// Handle list tools request
    fn handle_list_tools(&self) -> std::result::Result<Value, JsonRpcError> {
        let result = ListToolsResult {
            tools: self.service.registry().list_tools(),
        };

        to_value(result)
    }

    /// Handle call tool request
    async fn handle_call_tool(&self, params: Option<Value>) -> std::result::Result<Value, JsonRpcError> {
        let params: CallToolParams = match params {
            Some(p) => serde_json::from_value(p).map_err(|e| {
                JsonRpcError::invalid_params(format!("Invalid tool parameters: {}", e))
            })?,
            None => return Err(JsonRpcError::invalid_params("Missing tool parameters")),
        };

        match self.service.call_tool(&params.name, params.arguments).await {
            Ok(result) => to_value(result),
            Err(e) => Err(e.to_rpc_error()),
        }
    }
}

async fn write_response<W: AsyncWrite + Unpin>(output: &mut W, response: &JsonRpcResponse) -> Result<()> {
    let response_str = serde_json::to_string(response)?;
    output.write_all(response_str.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}

fn to_value<T: serde::Serialize>(value: T) -> std::result::Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
