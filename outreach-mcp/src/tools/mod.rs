//! Tool registry
//!
//! Binds tool names to their description, argument schema, and handler.
//! The registry is built once at startup and read concurrently afterwards:
//! `tools.call` resolves handlers by name, `tools.list` enumerates the
//! definitions.

pub mod census;
pub mod outreach;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use outreach_core::StampBackend;

use crate::error::McpError;

/// Tool definition advertised through `tools.list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,

    /// Description shown to the agent
    pub description: String,

    /// JSON Schema for input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Handler invoked with the (raw) tool arguments
pub type ToolHandler = Box<dyn Fn(&Value) -> Result<Value, McpError> + Send + Sync>;

struct RegisteredTool {
    definition: ToolDefinition,
    handler: ToolHandler,
}

/// Immutable name → tool binding
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Registry with both served tools bound to the given stamp backend
    pub fn with_default_tools(stamp: Arc<dyn StampBackend>) -> Self {
        let mut registry = Self::new();
        registry.register(outreach::tool_definition(), outreach::handler(stamp));
        registry.register(census::tool_definition(), Box::new(census::handle));
        registry
    }

    /// Add a tool
    pub fn register(&mut self, definition: ToolDefinition, handler: ToolHandler) {
        self.tools.push(RegisteredTool { definition, handler });
    }

    /// Definitions for `tools.list`, in registration order
    pub fn definitions(&self) -> Vec<&ToolDefinition> {
        self.tools.iter().map(|tool| &tool.definition).collect()
    }

    /// Invoke a tool by name
    pub fn invoke(&self, name: &str, arguments: &Value) -> Result<Value, McpError> {
        match self.tools.iter().find(|tool| tool.definition.name == name) {
            Some(tool) => (tool.handler)(arguments),
            None => Err(McpError::UnknownTool {
                name: name.to_string(),
            }),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
