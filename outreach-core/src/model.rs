//! Domain model for simulated patient outreach
//!
//! Mirrors the wire format of the outreach tool: camelCase field names,
//! lowercase channel/status literals.

use serde::{Deserialize, Serialize};

/// A contact channel that can carry an outreach message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Phone,
    Sms,
    Email,
}

impl ChannelKind {
    /// Fixed selection priority: phone first, then sms, then email.
    pub const PRIORITY: [ChannelKind; 3] = [ChannelKind::Phone, ChannelKind::Sms, ChannelKind::Email];

    /// Wire literal for this channel
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Phone => "phone",
            ChannelKind::Sms => "sms",
            ChannelKind::Email => "email",
        }
    }

    /// Parse a wire literal
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "phone" => Some(ChannelKind::Phone),
            "sms" => Some(ChannelKind::Sms),
            "email" => Some(ChannelKind::Email),
            _ => None,
        }
    }
}

/// Channel reported on an outcome; `Unavailable` means no channel could be
/// selected and the outcome was escalated for manual review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeChannel {
    Phone,
    Sms,
    Email,
    Unavailable,
}

impl OutcomeChannel {
    /// Wire literal for this channel
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeChannel::Phone => "phone",
            OutcomeChannel::Sms => "sms",
            OutcomeChannel::Email => "email",
            OutcomeChannel::Unavailable => "unavailable",
        }
    }
}

impl From<ChannelKind> for OutcomeChannel {
    fn from(kind: ChannelKind) -> Self {
        match kind {
            ChannelKind::Phone => OutcomeChannel::Phone,
            ChannelKind::Sms => OutcomeChannel::Sms,
            ChannelKind::Email => OutcomeChannel::Email,
        }
    }
}

/// Terminal state of one simulated outreach attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutreachStatus {
    Queued,
    NeedsManualReview,
}

/// Reachable contact methods for one patient.
///
/// Invariant (enforced at validation time): at least one of the three
/// channels is populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ContactInfo {
    /// Destination for the given channel, if populated
    pub fn destination(&self, channel: ChannelKind) -> Option<&str> {
        match channel {
            ChannelKind::Phone => self.phone.as_deref(),
            ChannelKind::Sms => self.sms.as_deref(),
            ChannelKind::Email => self.email.as_deref(),
        }
    }

    /// Populated channels as (channel, destination) pairs in priority order
    pub fn available(&self) -> Vec<(ChannelKind, &str)> {
        ChannelKind::PRIORITY
            .iter()
            .filter_map(|&kind| self.destination(kind).map(|dest| (kind, dest)))
            .collect()
    }
}

/// One patient in an outreach request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_channel: Option<ChannelKind>,
    pub contacts: ContactInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_plan_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Arguments of the `reach_out_to_patients` tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReachOutInput {
    pub patients: Vec<Patient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_channel: Option<ChannelKind>,
}

/// Result of one simulated outreach attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachOutcome {
    pub patient_id: String,
    pub full_name: String,
    /// Opaque unique token identifying this attempt
    pub engagement_id: String,
    pub status: OutreachStatus,
    pub channel: OutcomeChannel,
    pub summary: String,
    /// Rendered message; present only when queued
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_preview: Option<String>,
    /// Escalation reason; present only when manual review is needed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Job start time, ISO-8601 UTC at second precision
    pub timestamp: String,
}

/// Job-level metadata attached to every response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachMetadata {
    pub integration: String,
    pub duration_ms: u64,
    pub started_at: String,
}

/// Full result of one outreach job: one outcome per input patient, in input
/// order, plus metadata. Built fresh per request and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachResponse {
    pub outcomes: Vec<OutreachOutcome>,
    pub metadata: OutreachMetadata,
}
