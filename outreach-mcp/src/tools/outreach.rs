//! `reach_out_to_patients` tool

use std::sync::Arc;

use serde_json::{json, Value};

use outreach_core::{
    parse_reach_out_input, simulate, OutreachResponse, OutreachStatus, StampBackend,
};

use super::{ToolDefinition, ToolHandler};
use crate::error::McpError;

/// Name of the outreach tool; also the default tool for direct-mode bodies
pub const TOOL_NAME: &str = "reach_out_to_patients";

/// `reach_out_to_patients` tool definition
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: TOOL_NAME.to_string(),
        description: "Sends outreach notifications to patients via WellSky's care \
                      coordination services and returns a summary."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "required": ["patients"],
            "additionalProperties": false,
            "properties": {
                "patients": {
                    "type": "array",
                    "minItems": 1,
                    "description": "Patients to reach out to, in order",
                    "items": {
                        "type": "object",
                        "required": ["id", "fullName", "contacts"],
                        "additionalProperties": false,
                        "properties": {
                            "id": { "type": "string", "minLength": 1 },
                            "fullName": { "type": "string", "minLength": 1 },
                            "preferredChannel": {
                                "type": "string",
                                "enum": ["phone", "sms", "email"]
                            },
                            "contacts": {
                                "type": "object",
                                "additionalProperties": false,
                                "anyOf": [
                                    { "required": ["phone"] },
                                    { "required": ["sms"] },
                                    { "required": ["email"] }
                                ],
                                "properties": {
                                    "phone": { "type": "string", "minLength": 7 },
                                    "sms": { "type": "string", "minLength": 7 },
                                    "email": { "type": "string", "format": "email" }
                                }
                            },
                            "carePlanSummary": { "type": "string", "maxLength": 280 },
                            "notes": { "type": "string", "maxLength": 500 }
                        }
                    }
                },
                "messageTemplate": {
                    "type": "string",
                    "maxLength": 500,
                    "description": "Message template; {fullName} is replaced per patient"
                },
                "fallbackChannel": {
                    "type": "string",
                    "enum": ["phone", "sms", "email"]
                }
            }
        }),
    }
}

/// Handler bound to the given stamp backend
pub fn handler(stamp: Arc<dyn StampBackend>) -> ToolHandler {
    Box::new(move |arguments| {
        let input = parse_reach_out_input(arguments)
            .map_err(|issues| McpError::InvalidArguments { issues })?;

        let job = simulate(&input, stamp.as_ref());

        Ok(json!({
            "content": [
                { "type": "text", "text": text_summary(&job) },
                { "type": "json", "json": job }
            ]
        }))
    })
}

/// Human-readable job summary: a header with the start time, queued/manual
/// counts, then one line per outcome.
fn text_summary(job: &OutreachResponse) -> String {
    let queued = job
        .outcomes
        .iter()
        .filter(|o| o.status == OutreachStatus::Queued)
        .count();
    let manual = job.outcomes.len() - queued;

    let mut lines = vec![
        format!("Hand-off to WellSky Outreach on {}.", job.metadata.started_at),
        format!("Queued: {queued} | Needs manual review: {manual}."),
        String::new(),
    ];

    for outcome in &job.outcomes {
        let tail = match outcome.status {
            OutreachStatus::Queued => {
                format!("Queued via {}", outcome.channel.as_str().to_uppercase())
            }
            OutreachStatus::NeedsManualReview => format!(
                "Manual review required: {}",
                outcome.reason.as_deref().unwrap_or("unspecified")
            ),
        };
        lines.push(format!(
            "- {} ({}) -> {tail}",
            outcome.full_name, outcome.patient_id
        ));
    }

    lines.join("\n")
}
