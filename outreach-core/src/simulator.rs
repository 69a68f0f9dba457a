//! Outreach simulator
//!
//! Pure mapping from a validated `ReachOutInput` to an `OutreachResponse`:
//! no I/O, no real message dispatch. The only ambient inputs (start time,
//! engagement IDs) come through the injected `StampBackend`.

use std::time::Instant;

use chrono::SecondsFormat;

use crate::model::{
    ChannelKind, OutcomeChannel, OutreachMetadata, OutreachOutcome, OutreachResponse,
    OutreachStatus, Patient, ReachOutInput,
};
use crate::stamp::StampBackend;

/// Label stamped on every response's metadata
pub const INTEGRATION_LABEL: &str = "WellSky Patient Outreach";

/// Check-in message used when the request carries no template
pub const DEFAULT_TEMPLATE: &str =
    "Hello {fullName}, this is a care team check-in from WellSky. Reply if you need any support.";

/// Placeholder replaced with the patient's full name
const NAME_PLACEHOLDER: &str = "{fullName}";

struct ChannelDecision {
    status: OutreachStatus,
    channel: OutcomeChannel,
    summary: String,
    reason: Option<String>,
}

/// Selection precedence: preferred channel if populated, then the request
/// fallback if populated, then the first populated channel in priority
/// order, else manual review.
fn resolve_channel(patient: &Patient, fallback_channel: Option<ChannelKind>) -> ChannelDecision {
    let available = patient.contacts.available();

    let find = |wanted: Option<ChannelKind>| {
        wanted.and_then(|kind| available.iter().find(|(c, _)| *c == kind).copied())
    };

    let chosen = find(patient.preferred_channel)
        .or_else(|| find(fallback_channel))
        .or_else(|| available.first().copied());

    match chosen {
        Some((channel, destination)) => ChannelDecision {
            status: OutreachStatus::Queued,
            channel: channel.into(),
            summary: format!(
                "Hand-off to WellSky Outreach via {} ({destination}).",
                channel.as_str().to_uppercase()
            ),
            reason: None,
        },
        None => ChannelDecision {
            status: OutreachStatus::NeedsManualReview,
            channel: OutcomeChannel::Unavailable,
            summary: "No viable contact channel detected. Escalated for manual follow-up."
                .to_string(),
            reason: Some(
                "Patient record is missing reachable contact methods across phone, sms, and email."
                    .to_string(),
            ),
        },
    }
}

/// Simulate one outreach job.
///
/// Produces exactly one outcome per input patient, in input order. All
/// outcomes share the job start timestamp (second precision, UTC).
pub fn simulate(request: &ReachOutInput, stamp: &dyn StampBackend) -> OutreachResponse {
    let job_timer = Instant::now();
    let started_at = stamp
        .now()
        .to_rfc3339_opts(SecondsFormat::Secs, false);

    let template = request.message_template.as_deref().unwrap_or(DEFAULT_TEMPLATE);

    let outcomes = request
        .patients
        .iter()
        .map(|patient| {
            let decision = resolve_channel(patient, request.fallback_channel);
            let message_preview = (decision.status == OutreachStatus::Queued)
                .then(|| template.replace(NAME_PLACEHOLDER, &patient.full_name));

            OutreachOutcome {
                patient_id: patient.id.clone(),
                full_name: patient.full_name.clone(),
                engagement_id: stamp.engagement_id(),
                status: decision.status,
                channel: decision.channel,
                summary: decision.summary,
                message_preview,
                reason: decision.reason,
                timestamp: started_at.clone(),
            }
        })
        .collect();

    let metadata = OutreachMetadata {
        integration: INTEGRATION_LABEL.to_string(),
        duration_ms: job_timer.elapsed().as_millis() as u64,
        started_at,
    };

    OutreachResponse { outcomes, metadata }
}
