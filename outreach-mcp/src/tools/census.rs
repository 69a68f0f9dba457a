//! `get_active_patient_census` tool

use serde_json::{json, Value};

use outreach_core::{census, CensusFilter, FieldIssue};

use super::ToolDefinition;
use crate::error::McpError;

/// Name of the census tool
pub const TOOL_NAME: &str = "get_active_patient_census";

/// `get_active_patient_census` tool definition
pub fn tool_definition() -> ToolDefinition {
    ToolDefinition {
        name: TOOL_NAME.to_string(),
        description: "Retrieves the active home care patient census from WellSky. Returns all \
                      patients with open care plans, hospitalization flags, upcoming visits, \
                      caregiver assignments, and risk levels."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "filter": {
                    "type": "string",
                    "enum": ["all", "high_risk", "hospitalization_flag"],
                    "description": "Subset of the census to return (default: all)"
                }
            }
        }),
    }
}

/// Handle a census query
pub fn handle(arguments: &Value) -> Result<Value, McpError> {
    let Some(obj) = arguments.as_object() else {
        return Err(McpError::InvalidArguments {
            issues: vec![FieldIssue::new("", "Expected a JSON object.")],
        });
    };

    if let Some(unknown) = obj.keys().find(|key| key.as_str() != "filter") {
        return Err(McpError::InvalidArguments {
            issues: vec![FieldIssue::new(unknown.clone(), "Unexpected field.")],
        });
    }

    let filter = match obj.get("filter") {
        None | Some(Value::Null) => CensusFilter::All,
        Some(Value::String(s)) => CensusFilter::parse(Some(s)).map_err(McpError::from)?,
        Some(_) => {
            return Err(McpError::InvalidArguments {
                issues: vec![FieldIssue::new("filter", "Expected a string.")],
            })
        }
    };

    let records = census::query(filter);

    Ok(json!({
        "content": [
            { "type": "json", "json": records }
        ]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_returns_full_census() {
        let result = handle(&json!({})).unwrap();
        let records = result["content"][0]["json"].as_array().unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(result["content"][0]["type"], "json");
    }

    #[test]
    fn test_high_risk_filter() {
        let result = handle(&json!({ "filter": "high_risk" })).unwrap();
        let records = result["content"][0]["json"].as_array().unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r["risk_level"] == "HIGH"));
    }

    #[test]
    fn test_hospitalization_filter() {
        let result = handle(&json!({ "filter": "hospitalization_flag" })).unwrap();
        let records = result["content"][0]["json"].as_array().unwrap();
        assert!(records.iter().all(|r| r["hospitalization_flag"] == true));
    }

    #[test]
    fn test_invalid_filter() {
        let err = handle(&json!({ "filter": "bogus" })).unwrap_err();
        match err {
            McpError::InvalidArguments { issues } => {
                assert_eq!(issues[0].path, "filter");
                assert!(issues[0]
                    .message
                    .contains("all, high_risk, hospitalization_flag"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_field() {
        let err = handle(&json!({ "risk": "HIGH" })).unwrap_err();
        match err {
            McpError::InvalidArguments { issues } => assert_eq!(issues[0].path, "risk"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
