//! System stamp backend using the wall clock and random UUIDs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::super::StampBackend;

/// Production backend: `Utc::now()` and UUIDv4 engagement IDs
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemStampBackend;

impl SystemStampBackend {
    pub fn new() -> Self {
        Self
    }
}

impl StampBackend for SystemStampBackend {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn engagement_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn name(&self) -> &'static str {
        "system"
    }
}
