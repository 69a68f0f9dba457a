//! Request validation
//!
//! Explicit structural validation of incoming tool arguments. Each input type
//! has a `parse_*` function that walks the raw JSON value and accumulates
//! `FieldIssue`s with bracket-indexed paths (e.g. `patients[0].contacts.phone`).
//! Validation runs at decode time, before any business logic.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::model::{ChannelKind, ContactInfo, Patient, ReachOutInput};

/// Minimum digits for a dialable phone/sms destination
const MIN_DIAL_LENGTH: usize = 7;
/// Maximum length of a care plan summary
const MAX_CARE_PLAN_LENGTH: usize = 280;
/// Maximum length of free-form notes and the message template
const MAX_NOTES_LENGTH: usize = 500;
const MAX_TEMPLATE_LENGTH: usize = 500;

/// A single validation finding: where, and what went wrong
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldIssue {
    /// Path to the offending element (e.g. `patients[1].fullName`)
    pub path: String,
    /// Human-readable message
    pub message: String,
}

impl FieldIssue {
    /// Create a new issue
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"))
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn reject_unknown_keys(
    obj: &Map<String, Value>,
    allowed: &[&str],
    parent: &str,
    issues: &mut Vec<FieldIssue>,
) {
    for key in obj.keys() {
        if !allowed.contains(&key.as_str()) {
            issues.push(FieldIssue::new(join(parent, key), "Unexpected field."));
        }
    }
}

/// Optional string field with a maximum length. `null` counts as absent.
fn optional_bounded_string(
    obj: &Map<String, Value>,
    key: &str,
    parent: &str,
    max_length: usize,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            if s.chars().count() > max_length {
                issues.push(FieldIssue::new(
                    join(parent, key),
                    format!("Must be at most {max_length} characters."),
                ));
                None
            } else {
                Some(s.clone())
            }
        }
        Some(_) => {
            issues.push(FieldIssue::new(join(parent, key), "Expected a string."));
            None
        }
    }
}

/// Optional channel literal. `null` counts as absent.
fn optional_channel(
    obj: &Map<String, Value>,
    key: &str,
    parent: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<ChannelKind> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => match ChannelKind::parse(s) {
            Some(kind) => Some(kind),
            None => {
                issues.push(FieldIssue::new(
                    join(parent, key),
                    "Expected one of: phone, sms, email.",
                ));
                None
            }
        },
        Some(_) => {
            issues.push(FieldIssue::new(
                join(parent, key),
                "Expected one of: phone, sms, email.",
            ));
            None
        }
    }
}

/// Required non-empty string field. Whitespace-only values are rejected.
fn required_text(
    obj: &Map<String, Value>,
    key: &str,
    parent: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => {
            issues.push(FieldIssue::new(join(parent, key), "This field is required."));
            None
        }
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                issues.push(FieldIssue::new(
                    join(parent, key),
                    "This field cannot be empty.",
                ));
                None
            } else {
                Some(s.clone())
            }
        }
        Some(_) => {
            issues.push(FieldIssue::new(join(parent, key), "Expected a string."));
            None
        }
    }
}

fn parse_contact_info(
    value: &Value,
    parent: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<ContactInfo> {
    let Some(obj) = value.as_object() else {
        issues.push(FieldIssue::new(parent, "Expected an object."));
        return None;
    };

    reject_unknown_keys(obj, &["phone", "sms", "email"], parent, issues);

    let before = issues.len();

    let mut dialable = |key: &str| -> Option<String> {
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => {
                if s.chars().count() < MIN_DIAL_LENGTH {
                    issues.push(FieldIssue::new(
                        join(parent, key),
                        format!("Must be at least {MIN_DIAL_LENGTH} characters."),
                    ));
                    None
                } else {
                    Some(s.clone())
                }
            }
            Some(_) => {
                issues.push(FieldIssue::new(join(parent, key), "Expected a string."));
                None
            }
        }
    };

    let phone = dialable("phone");
    let sms = dialable("sms");

    let email = match obj.get("email") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            if email_pattern().is_match(s) {
                Some(s.clone())
            } else {
                issues.push(FieldIssue::new(
                    join(parent, "email"),
                    "Not a valid email address.",
                ));
                None
            }
        }
        Some(_) => {
            issues.push(FieldIssue::new(join(parent, "email"), "Expected a string."));
            None
        }
    };

    if issues.len() > before {
        return None;
    }

    if phone.is_none() && sms.is_none() && email.is_none() {
        issues.push(FieldIssue::new(
            parent,
            "Provide at least one reachable contact method (phone, sms, or email).",
        ));
        return None;
    }

    Some(ContactInfo { phone, sms, email })
}

fn parse_patient(value: &Value, parent: &str, issues: &mut Vec<FieldIssue>) -> Option<Patient> {
    let Some(obj) = value.as_object() else {
        issues.push(FieldIssue::new(parent, "Expected a patient object."));
        return None;
    };

    reject_unknown_keys(
        obj,
        &["id", "fullName", "preferredChannel", "contacts", "carePlanSummary", "notes"],
        parent,
        issues,
    );

    let id = required_text(obj, "id", parent, issues);
    let full_name = required_text(obj, "fullName", parent, issues);
    let preferred_channel = optional_channel(obj, "preferredChannel", parent, issues);
    let care_plan_summary =
        optional_bounded_string(obj, "carePlanSummary", parent, MAX_CARE_PLAN_LENGTH, issues);
    let notes = optional_bounded_string(obj, "notes", parent, MAX_NOTES_LENGTH, issues);

    let contacts = match obj.get("contacts") {
        None | Some(Value::Null) => {
            issues.push(FieldIssue::new(
                join(parent, "contacts"),
                "This field is required.",
            ));
            None
        }
        Some(value) => parse_contact_info(value, &join(parent, "contacts"), issues),
    };

    match (id, full_name, contacts) {
        (Some(id), Some(full_name), Some(contacts)) => Some(Patient {
            id,
            full_name,
            preferred_channel,
            contacts,
            care_plan_summary,
            notes,
        }),
        _ => None,
    }
}

/// Validate and decode the arguments of `reach_out_to_patients`.
///
/// Returns the typed request, or every issue found (the walk does not stop
/// at the first problem).
pub fn parse_reach_out_input(value: &Value) -> Result<ReachOutInput, Vec<FieldIssue>> {
    let mut issues = Vec::new();

    let Some(obj) = value.as_object() else {
        return Err(vec![FieldIssue::new(
            "",
            "Expected a JSON object with outreach arguments.",
        )]);
    };

    reject_unknown_keys(
        obj,
        &["patients", "messageTemplate", "fallbackChannel"],
        "",
        &mut issues,
    );

    // Parsed patients keep their original input index so duplicate-id
    // paths stay accurate when earlier entries failed to parse.
    let parsed: Vec<(usize, Patient)> = match obj.get("patients") {
        None | Some(Value::Null) => {
            issues.push(FieldIssue::new("patients", "This field is required."));
            Vec::new()
        }
        Some(Value::Array(items)) => {
            if items.is_empty() {
                issues.push(FieldIssue::new("patients", "Provide at least one patient."));
            }
            items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| {
                    parse_patient(item, &format!("patients[{index}]"), &mut issues)
                        .map(|patient| (index, patient))
                })
                .collect()
        }
        Some(_) => {
            issues.push(FieldIssue::new("patients", "Expected an array of patients."));
            Vec::new()
        }
    };

    // Patient ids must be unique within a single request.
    let mut seen: HashSet<&str> = HashSet::new();
    for (index, patient) in &parsed {
        if !seen.insert(patient.id.as_str()) {
            issues.push(FieldIssue::new(
                format!("patients[{index}].id"),
                format!("Duplicate patient id '{}'.", patient.id),
            ));
        }
    }
    let patients: Vec<Patient> = parsed.into_iter().map(|(_, patient)| patient).collect();

    let message_template =
        optional_bounded_string(obj, "messageTemplate", "", MAX_TEMPLATE_LENGTH, &mut issues);
    let fallback_channel = optional_channel(obj, "fallbackChannel", "", &mut issues);

    if issues.is_empty() {
        Ok(ReachOutInput {
            patients,
            message_template,
            fallback_channel,
        })
    } else {
        Err(issues)
    }
}
