//! Server-Sent-Events framing
//!
//! Every RPC-mode response is delivered as a single-frame SSE stream:
//! `event: next` + the envelope, then an `event: completed` terminator for
//! successes, or a lone `event: error` frame for errors. Frames are rendered
//! only after the result is fully computed, so clients never observe partial
//! output.

use serde_json::{json, Value};

/// Event name for a successful envelope
pub const EVENT_NEXT: &str = "next";
/// Event name for the stream terminator
pub const EVENT_COMPLETED: &str = "completed";
/// Event name for an error envelope
pub const EVENT_ERROR: &str = "error";

/// One SSE frame: an event name and a JSON data payload
#[derive(Debug, Clone)]
pub struct SseFrame {
    pub event: &'static str,
    pub data: Value,
}

impl SseFrame {
    pub fn new(event: &'static str, data: Value) -> Self {
        Self { event, data }
    }
}

/// Frames for a success envelope: `next` followed by the `completed`
/// terminator.
pub fn success_frames(envelope: Value) -> Vec<SseFrame> {
    vec![
        SseFrame::new(EVENT_NEXT, envelope),
        SseFrame::new(EVENT_COMPLETED, json!({})),
    ]
}

/// Frames for an error envelope: a single `error` frame, no terminator.
pub fn error_frames(envelope: Value) -> Vec<SseFrame> {
    vec![SseFrame::new(EVENT_ERROR, envelope)]
}

/// Render frames to wire text. JSON data is compact, so each `data:` line
/// is a single line.
pub fn render(frames: &[SseFrame]) -> String {
    frames
        .iter()
        .map(|frame| format!("event: {}\ndata: {}\n\n", frame.event, frame.data))
        .collect()
}
