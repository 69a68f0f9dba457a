//! Clock and engagement-ID sources
//!
//! The simulator needs two ambient inputs: the job start time and fresh
//! engagement IDs. Both hide behind `StampBackend` so tests can substitute
//! deterministic values.
//!
//! - `SystemStampBackend`: wall clock + random UUIDs (production)
//! - `MockStampBackend`: fixed clock + sequential IDs (testing)

pub mod backends;

use chrono::{DateTime, Utc};

pub use backends::{MockStampBackend, SystemStampBackend};

/// Source of job timestamps and engagement IDs
pub trait StampBackend: Send + Sync {
    /// Current time, UTC
    fn now(&self) -> DateTime<Utc>;

    /// A fresh engagement ID, unique across calls
    fn engagement_id(&self) -> String;

    /// Backend name (for logging)
    fn name(&self) -> &'static str;
}
