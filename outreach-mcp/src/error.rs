//! Error types for the MCP protocol layer

use serde_json::json;
use thiserror::Error;

use outreach_core::{FieldIssue, OutreachError};

use crate::protocol::{codes, McpErrorBody};

/// Result type for MCP operations
pub type McpResult<T> = Result<T, McpError>;

/// Errors surfaced through the JSON-RPC error envelope
#[derive(Error, Debug)]
pub enum McpError {
    /// `tools.call` named a tool that is not registered
    #[error("Unknown tool: '{name}'.")]
    UnknownTool { name: String },

    /// Tool arguments failed schema validation
    #[error("Invalid tool arguments.")]
    InvalidArguments { issues: Vec<FieldIssue> },

    /// RPC method outside the control-method table
    #[error("Unsupported method '{method}'.")]
    UnsupportedMethod { method: String },

    /// `prompts.get` — no prompts are served
    #[error("Prompt not found.")]
    PromptNotFound,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error code for this error
    pub fn rpc_code(&self) -> i32 {
        match self {
            McpError::UnknownTool { .. } => codes::METHOD_NOT_FOUND,
            McpError::InvalidArguments { .. } => codes::INVALID_PARAMS,
            McpError::UnsupportedMethod { .. } => codes::METHOD_NOT_FOUND,
            McpError::PromptNotFound => codes::PROMPT_NOT_FOUND,
            McpError::Serialization(_) => codes::INTERNAL_ERROR,
        }
    }

    /// JSON-RPC error object, with field issues attached as `data.errors`
    pub fn to_rpc_error(&self) -> McpErrorBody {
        let data = match self {
            McpError::InvalidArguments { issues } => Some(json!({ "errors": issues })),
            _ => None,
        };

        McpErrorBody {
            code: self.rpc_code(),
            message: self.to_string(),
            data,
        }
    }
}

impl From<OutreachError> for McpError {
    fn from(err: OutreachError) -> Self {
        let message = err.to_string();
        match err {
            OutreachError::Validation { issues } => McpError::InvalidArguments { issues },
            OutreachError::InvalidFilter { .. } => McpError::InvalidArguments {
                issues: vec![FieldIssue::new("filter", message)],
            },
            OutreachError::Json(e) => McpError::Serialization(e),
        }
    }
}
