//! # Outreach Core
//!
//! Pure domain logic for the simulated WellSky patient outreach service:
//!
//! - **Model**: typed records for patients, contact info, outreach requests
//!   and outcomes
//! - **Validation**: explicit structural validation with field-path issues
//! - **Simulator**: maps a validated request to fabricated outcomes (no real
//!   messages are ever sent)
//! - **Census**: static, immutable snapshot of the active patient roster
//!
//! Transport concerns (JSON-RPC dispatch, HTTP, SSE) live in `outreach-mcp`
//! and `outreach-server`; this crate stays embeddable and free of I/O.
//!
//! ## Example
//!
//! ```rust
//! use outreach_core::{simulate, SystemStampBackend};
//! use outreach_core::validate::parse_reach_out_input;
//! use serde_json::json;
//!
//! let input = parse_reach_out_input(&json!({
//!     "patients": [{
//!         "id": "p-1",
//!         "fullName": "Jane Doe",
//!         "contacts": { "phone": "5551234567" }
//!     }]
//! })).unwrap();
//!
//! let stamp = SystemStampBackend::new();
//! let response = simulate(&input, &stamp);
//! assert_eq!(response.outcomes.len(), 1);
//! ```

pub mod census;
pub mod error;
pub mod model;
pub mod simulator;
pub mod stamp;
pub mod validate;

// Re-export main types
pub use census::{CensusFilter, CensusRecord, RiskLevel, PATIENT_CENSUS};
pub use error::{ErrorDetail, ErrorResponse, OutreachError, Result};
pub use model::{
    ChannelKind, ContactInfo, OutcomeChannel, OutreachMetadata, OutreachOutcome,
    OutreachResponse, OutreachStatus, Patient, ReachOutInput,
};
pub use simulator::{simulate, DEFAULT_TEMPLATE, INTEGRATION_LABEL};
pub use stamp::{MockStampBackend, StampBackend, SystemStampBackend};
pub use validate::{parse_reach_out_input, FieldIssue};
