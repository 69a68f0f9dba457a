//! JSON-RPC 2.0 envelope types for the MCP transport

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version literal carried on every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC error codes, plus the server-specific prompt code
pub mod codes {
    /// Invalid JSON was received.
    pub const PARSE_ERROR: i32 = -32700;
    /// The JSON sent is not a valid Request object.
    pub const INVALID_REQUEST: i32 = -32600;
    /// The method (or tool) does not exist.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid method parameter(s).
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i32 = -32603;
    /// No prompts are served here.
    pub const PROMPT_NOT_FOUND: i32 = -32004;
}

/// Incoming JSON-RPC request
#[derive(Debug, Clone, Deserialize)]
pub struct McpRequest {
    #[serde(default)]
    pub jsonrpc: String,
    /// Request ID, echoed back on the response (`null` when absent)
    #[serde(default)]
    pub id: Value,
    pub method: String,
    /// Parameters; absent params behave as an empty mapping
    #[serde(default)]
    pub params: Value,
}

/// Outgoing JSON-RPC response envelope.
///
/// The `id` always serializes, `null` included, so clients can correlate
/// responses to requests.
#[derive(Debug, Clone, Serialize)]
pub struct McpResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpErrorBody>,
}

impl McpResponse {
    /// Success envelope
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Error envelope
    pub fn error(id: Value, error: McpErrorBody) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize)]
pub struct McpErrorBody {
    pub code: i32,
    pub message: String,
    /// Structured detail (e.g. field issues for -32602)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
