//! Error types for outreach operations
//!
//! Every failure maps to a structured response: a stable error code, a
//! human-readable message, and an HTTP status for server integrations.
//! Validation failures carry the full list of field issues.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validate::FieldIssue;

/// Result type alias for outreach operations
pub type Result<T> = std::result::Result<T, OutreachError>;

/// Errors that can occur while handling an outreach or census request
#[derive(Error, Debug)]
pub enum OutreachError {
    /// Request arguments failed structural validation
    #[error("Invalid outreach request.")]
    Validation { issues: Vec<FieldIssue> },

    /// Census filter value outside the accepted set
    #[error("Invalid filter. Expected one of: all, high_risk, hospitalization_flag.")]
    InvalidFilter { value: String },

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OutreachError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            OutreachError::Validation { .. } => "VALIDATION_FAILED",
            OutreachError::InvalidFilter { .. } => "INVALID_FILTER",
            OutreachError::Json(_) => "JSON_ERROR",
        }
    }

    /// HTTP status code for this error
    pub fn http_status_code(&self) -> u16 {
        match self {
            OutreachError::Validation { .. } | OutreachError::InvalidFilter { .. } => 400,
            OutreachError::Json(_) => 500,
        }
    }

    /// JSON-serializable response body for this error
    pub fn to_error_response(&self) -> ErrorResponse {
        let errors = match self {
            OutreachError::Validation { issues } => Some(issues.clone()),
            OutreachError::InvalidFilter { value } => Some(vec![FieldIssue::new(
                "filter",
                format!("Unexpected value '{value}'."),
            )]),
            _ => None,
        };

        ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                errors,
            },
        }
    }
}

/// JSON-serializable error response for APIs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail for JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable error code (e.g., "VALIDATION_FAILED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field issues, when the failure is a validation failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldIssue>>,
}
