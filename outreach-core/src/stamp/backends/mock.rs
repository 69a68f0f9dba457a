//! Mock stamp backend for deterministic tests

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, TimeZone, Utc};

use super::super::StampBackend;

/// Testing backend: a fixed clock and sequential `engagement-NNNN` IDs.
///
/// Exposed unconditionally so downstream crates can use it in their own
/// tests.
#[derive(Debug)]
pub struct MockStampBackend {
    now: DateTime<Utc>,
    counter: AtomicU64,
}

impl MockStampBackend {
    /// Backend pinned to the given instant
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            counter: AtomicU64::new(0),
        }
    }

    /// Backend pinned to an arbitrary fixed instant
    pub fn fixed() -> Self {
        Self::new(Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap())
    }

    /// Number of engagement IDs handed out so far
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}

impl StampBackend for MockStampBackend {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn engagement_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("engagement-{n:04}")
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let backend = MockStampBackend::fixed();
        assert_eq!(backend.engagement_id(), "engagement-0001");
        assert_eq!(backend.engagement_id(), "engagement-0002");
        assert_eq!(backend.issued(), 2);
    }

    #[test]
    fn test_fixed_clock() {
        let backend = MockStampBackend::fixed();
        assert_eq!(backend.now(), backend.now());
    }
}
