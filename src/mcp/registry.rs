//! Tool catalog and dispatch
//!
//! Each server names its tools with an enum implementing [`ToolKind`]. The
//! catalog entry and the handler are both keyed on that enum, so a tool can
//! not be listed without being dispatchable (and vice versa).

use std::collections::HashMap;
use std::hash::Hash;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::error::{CloudMcpError, McpError, Result, ValidationError};
use crate::mcp::types::{CallToolResult, ServerInfo, Tool};

/// A closed set of tools exposed by one server
pub trait ToolKind: Copy + Eq + Hash + Send + Sync + 'static {
    /// Every tool, in catalog order
    const ALL: &'static [Self];

    /// Stable tool name
    fn name(self) -> &'static str;

    /// Human description shown to the agent
    fn description(self) -> &'static str;

    /// JSON schema of the accepted arguments
    fn input_schema(self) -> Value;

    fn descriptor(self) -> Tool {
        Tool {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Name lookup for a [`ToolKind`]
#[derive(Debug, Clone)]
pub struct ToolRegistry<K: ToolKind> {
    by_name: HashMap<&'static str, K>,
}

impl<K: ToolKind> ToolRegistry<K> {
    /// Build the registry.
    ///
    /// Panics if two tools share a name; that is a programming error caught by
    /// the catalog tests.
    pub fn new() -> Self {
        let mut by_name = HashMap::with_capacity(K::ALL.len());
        for &kind in K::ALL {
            let previous = by_name.insert(kind.name(), kind);
            assert!(previous.is_none(), "duplicate tool name: {}", kind.name());
        }
        Self { by_name }
    }

    /// Tool descriptors in catalog order
    pub fn list_tools(&self) -> Vec<Tool> {
        K::ALL.iter().map(|kind| kind.descriptor()).collect()
    }

    /// Resolve a tool name
    pub fn resolve(&self, name: &str) -> Result<K> {
        self.by_name.get(name).copied().ok_or_else(|| {
            CloudMcpError::Mcp(McpError::UnknownTool {
                name: name.to_string(),
            })
        })
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl<K: ToolKind> Default for ToolRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A server's tool set: catalog plus handlers
#[async_trait]
pub trait ToolService: Send + Sync {
    type Kind: ToolKind;

    /// Server name and version reported on `initialize`
    fn server_info(&self) -> ServerInfo;

    fn registry(&self) -> &ToolRegistry<Self::Kind>;

    /// Run the handler for one tool
    async fn invoke(&self, tool: Self::Kind, args: Value) -> Result<CallToolResult>;

    /// Resolve `name` and run its handler
    async fn call_tool(&self, name: &str, args: Value) -> Result<CallToolResult> {
        let tool = self.registry().resolve(name)?;
        tracing::info!(tool = name, "Calling tool");
        let result = self.invoke(tool, args).await;
        if let Err(e) = &result {
            tracing::warn!(tool = name, error = %e, "Tool call failed");
        }
        result
    }
}

/// Deserialize and validate tool arguments.
///
/// A missing `arguments` object is treated as empty so tools whose parameters
/// are all optional can be called bare.
pub fn parse_args<T>(args: Value) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };

    let parsed: T = serde_json::from_value(args).map_err(|e| {
        CloudMcpError::Validation(ValidationError::InvalidArguments {
            message: e.to_string(),
        })
    })?;
    parsed.validate()?;
    Ok(parsed)
}
