//! # Outreach MCP
//!
//! Protocol layer for the outreach simulator. One dispatcher multiplexes a
//! single endpoint between two request shapes:
//!
//! ```text
//! raw body
//!    │
//!    ▼
//! ┌─────────────────────────────────────┐
//! │             McpServer               │
//! │                                     │
//! │  object with "method"?              │
//! │   ├── no  → direct tool call        │──► plain JSON
//! │   │        (reach_out_to_patients)  │
//! │   └── yes → JSON-RPC routing        │──► single-frame SSE
//! │        ├── tools.call → registry    │
//! │        └── control-method table     │
//! └─────────────────────────────────────┘
//! ```
//!
//! Tools:
//! - `reach_out_to_patients` — simulate an outreach job
//! - `get_active_patient_census` — query the static census
//!
//! All business logic lives in `outreach-core`; this crate only classifies,
//! routes, validates, and shapes responses.

pub mod error;
pub mod protocol;
pub mod server;
pub mod sse;
pub mod tools;

pub use error::{McpError, McpResult};
pub use protocol::{McpErrorBody, McpRequest, McpResponse};
pub use server::{McpServer, Reply};
pub use tools::{ToolDefinition, ToolRegistry};

/// Server metadata for the MCP protocol
pub const SERVER_NAME: &str = "wellsky-outreach-simulator";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROTOCOL_VERSION: &str = "2024-11-05";
